//! Source-spec parsing for `configure`.
//!
//! A source spec is `"<url> [options...]"`. The option tail is forwarded to
//! the clone command; for git-svn, single-letter flags are first expanded to
//! their long form.

use super::Backend;

/// One entry of a clone command's short-option table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ShortOption {
    pub short: char,
    pub long: &'static str,
    /// The flag consumes the rest of its token (`-r1:HEAD`).
    pub takes_value: bool,
}

impl ShortOption {
    const fn flag(short: char, long: &'static str) -> Self {
        Self {
            short,
            long,
            takes_value: false,
        }
    }

    const fn valued(short: char, long: &'static str) -> Self {
        Self {
            short,
            long,
            takes_value: true,
        }
    }

    /// `--long-name` spelling of the option.
    pub fn long_flag(&self) -> String {
        format!("--{}", self.long.replace('_', "-"))
    }
}

const SVN_SHORT_OPTIONS: &[ShortOption] = &[
    ShortOption::valued('A', "authors_file"),
    ShortOption::valued('b', "branches"),
    ShortOption::flag('m', "minimize_url"),
    ShortOption::flag('q', "quiet"),
    ShortOption::valued('r', "revision"),
    ShortOption::flag('s', "stdlayout"),
    ShortOption::valued('t', "tags"),
    ShortOption::valued('T', "trunk"),
];

const GIT_SHORT_OPTIONS: &[ShortOption] = &[
    ShortOption::flag('n', "no_checkout"),
    ShortOption::flag('l', "local"),
    ShortOption::flag('s', "shared"),
    ShortOption::valued('o', "origin"),
    ShortOption::valued('b', "branch"),
    ShortOption::valued('u', "upload_pack"),
    ShortOption::valued('c', "config"),
];

/// Short-option table for a backend's clone command.
pub(crate) fn short_option_table(backend: Backend) -> &'static [ShortOption] {
    match backend {
        Backend::Git => GIT_SHORT_OPTIONS,
        Backend::Svn => SVN_SHORT_OPTIONS,
    }
}

/// URL and option tokens of a source spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceSpec {
    pub url: String,
    pub options: Vec<String>,
}

impl SourceSpec {
    /// Split at the first whitespace run. The tail is tokenized on
    /// whitespace without shell quoting.
    pub fn parse(spec: &str) -> Self {
        let spec = spec.trim();
        let (url, tail) = match spec.split_once(char::is_whitespace) {
            Some((url, tail)) => (url, tail),
            None => (spec, ""),
        };
        Self {
            url: url.to_string(),
            options: tail.split_whitespace().map(String::from).collect(),
        }
    }
}

/// Expand single-letter flags through the backend's table.
///
/// Boolean flags may be bundled and expand letter by letter, so `-sq`
/// becomes `--stdlayout --quiet`. A value-taking flag consumes the rest of
/// its token: `-X` becomes `--long-name` and `-Xvalue` becomes
/// `--long-name=value`. Tokens containing an unknown letter, long flags and
/// plain values pass through unchanged.
pub(crate) fn expand_options(backend: Backend, options: &[String]) -> Vec<String> {
    let table = short_option_table(backend);
    options
        .iter()
        .flat_map(|option| expand_option(table, option))
        .collect()
}

fn expand_option(table: &[ShortOption], option: &str) -> Vec<String> {
    let unchanged = || vec![option.to_string()];
    let Some(rest) = option.strip_prefix('-') else {
        return unchanged();
    };
    if rest.is_empty() || rest.starts_with('-') {
        return unchanged();
    }

    let mut expanded = Vec::new();
    let mut chars = rest.chars();
    while let Some(flag) = chars.next() {
        let Some(entry) = table.iter().find(|entry| entry.short == flag) else {
            return unchanged();
        };
        if !entry.takes_value {
            expanded.push(entry.long_flag());
            continue;
        }
        let value = chars.as_str();
        if value.is_empty() {
            expanded.push(entry.long_flag());
        } else {
            expanded.push(format!("{}={value}", entry.long_flag()));
        }
        break;
    }
    expanded
}
