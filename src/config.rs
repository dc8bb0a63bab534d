use crate::error::{Error, Result};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Config file name inside the per-user config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory under the user config dir holding [`CONFIG_FILE_NAME`].
pub const CONFIG_DIR_NAME: &str = "scmws";

/// Default segment that holds svn branches in a standard layout.
pub const DEFAULT_BRANCH_PREFIX: &str = "branches";

const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(200);

/// Settings a workspace is constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    /// Echo every command and its output to stdout.
    pub verbose: bool,
    /// svn path segment stripped from branch URLs.
    pub branch_prefix: String,
    /// Log sink; stderr when unset.
    pub log_file: Option<PathBuf>,
    /// Pause between svn revision lookups.
    pub revision_retry_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verbose: false,
            branch_prefix: DEFAULT_BRANCH_PREFIX.to_string(),
            log_file: None,
            revision_retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub(crate) struct Overrides {
    pub verbose: bool,
    pub branch_prefix: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Merge overrides over the config file over defaults.
    pub fn resolve(overrides: Overrides, file: Config) -> Result<Self> {
        let defaults = Settings::default();
        let branch_prefix = match overrides.branch_prefix {
            Some(prefix) => {
                if let Some(err) = validate_branch_prefix(&prefix) {
                    return Err(Error::ConfigValidation {
                        message: format!("  - --branch-prefix: {err}"),
                    });
                }
                prefix
            }
            None => file.branch_prefix.unwrap_or(defaults.branch_prefix),
        };

        Ok(Self {
            verbose: overrides.verbose || file.verbose.unwrap_or(false),
            branch_prefix,
            log_file: overrides.log_file.or(file.log_file),
            revision_retry_delay: file
                .revision_retry_delay
                .unwrap_or(defaults.revision_retry_delay),
        })
    }
}

/// Default config file location, if the platform has a config dir.
pub(crate) fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load the config file.
///
/// An explicit path must exist. The default location is optional and a
/// missing file yields an empty config.
pub(crate) fn load(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            path.to_path_buf()
        }
        None => match default_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(Config::default()),
        },
    };

    log::debug!("loading config from {}", path.display());
    let content = fs::read_to_string(&path)?;
    parse(&content)
}

/// Parse and validate config file content.
pub(crate) fn parse(content: &str) -> Result<Config> {
    // Parse into RawConfig (permissive, all fields optional)
    let raw: RawConfig = toml::from_str(content).map_err(|e| Error::ConfigParse {
        message: e.message().to_string(),
    })?;

    Config::try_from(raw)
}

// Raw type for permissive TOML parsing. Validation collects every problem
// at once instead of stopping at the first.

#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    verbose: Option<bool>,
    branch_prefix: Option<String>,
    log_file: Option<PathBuf>,
    revision_retry_delay_ms: Option<u64>,
}

/// Validated contents of the config file.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Config {
    pub verbose: Option<bool>,
    pub branch_prefix: Option<String>,
    pub log_file: Option<PathBuf>,
    pub revision_retry_delay: Option<Duration>,
}

impl TryFrom<RawConfig> for Config {
    type Error = Error;

    fn try_from(raw: RawConfig) -> Result<Self> {
        let mut errors = Vec::new();

        if let Some(prefix) = &raw.branch_prefix
            && let Some(err) = validate_branch_prefix(prefix)
        {
            errors.push(format!("  - branch_prefix: {err}"));
        }

        if let Some(path) = &raw.log_file
            && path.as_os_str().is_empty()
        {
            errors.push("  - log_file: path must not be empty".to_string());
        }

        if !errors.is_empty() {
            return Err(Error::ConfigValidation {
                message: errors.join("\n"),
            });
        }

        Ok(Config {
            verbose: raw.verbose,
            branch_prefix: raw.branch_prefix,
            log_file: raw.log_file,
            revision_retry_delay: raw.revision_retry_delay_ms.map(Duration::from_millis),
        })
    }
}

/// Validate a branch prefix and return an error message if invalid.
fn validate_branch_prefix(prefix: &str) -> Option<String> {
    if prefix.trim().is_empty() {
        return Some("must not be empty".to_string());
    }
    if prefix.starts_with('/') || prefix.ends_with('/') {
        return Some(format!(
            "must not start or end with '/': {prefix}"
        ));
    }
    None
}
