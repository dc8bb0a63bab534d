use std::path::PathBuf;

use thiserror::Error;

use crate::vcs::Backend;

/// Application errors.
#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error("{} is not empty. You must clear it.{}", .path.display(), listing_suffix(.listing))]
    AlreadyConfigured {
        path: PathBuf,
        /// Directory listing, only collected in verbose mode.
        listing: Option<String>,
    },

    #[error("Unknown SCM type: {url}\n  Expected a git URL (git://, git@, *.git) or an svn URL.")]
    UnknownBackend { url: String },

    #[error(
        "Workspace {} has a .git directory but no remote and no git-svn metadata.\n  The backend cannot be determined; clear the workspace and configure it again.",
        .path.display()
    )]
    UnresolvedBackend { path: PathBuf },

    #[error("Illegal operation for {backend}: {operation}")]
    UnsupportedOperation {
        operation: &'static str,
        backend: Backend,
    },

    #[error("Workspace is not configured: {}\n  Run `scmws configure <url>` first.", .path.display())]
    NotConfigured { path: PathBuf },

    #[error("Command failed: {command}\n{output}")]
    CommandFailed { command: String, output: String },

    #[error("Failed to get svn revision for {sha} after {attempts} attempts")]
    RevisionLookupFailed { sha: String, attempts: u32 },

    #[error("Failed to parse config: {message}")]
    ConfigParse { message: String },

    #[error("Your scmws configuration is invalid.\n\n{message}")]
    ConfigValidation { message: String },

    #[error("Config file not found: {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid output pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn listing_suffix(listing: &Option<String>) -> String {
    match listing {
        Some(listing) => format!("\n{listing}"),
        None => String::new(),
    }
}

/// Result type alias for this crate.
pub(crate) type Result<T> = std::result::Result<T, Error>;
