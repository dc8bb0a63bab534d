//! Normalization of raw git and git-svn output.
//!
//! Both backends expose branch names, tags and commit identity in different
//! shapes. The functions here turn that text into the canonical values the
//! workspace reports. They are pure so they can be tested without a
//! repository.

use crate::error::{Error, Result};
use crate::vcs::Backend;

use std::collections::HashSet;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

type Pattern = LazyLock<std::result::Result<Regex, regex::Error>>;

static INFO_LINE: Pattern = LazyLock::new(|| Regex::new(r"(?m)^(.+?): (.*?)\r?$"));
static ON_BRANCH: Pattern = LazyLock::new(|| Regex::new(r"(?m)^On branch\s*(.+?)\s*$"));
static DECORATED_COMMIT: Pattern =
    LazyLock::new(|| Regex::new(r"(?m)^commit\s[0-9a-f]+\s\((.+)\)"));

fn compiled(pattern: &'static Pattern) -> Result<&'static Regex> {
    match &**pattern {
        Ok(regex) => Ok(regex),
        Err(e) => Err(Error::Pattern(e.clone())),
    }
}

/// Parse a `git svn info` block of `Key: value` lines.
///
/// Keys are lower-cased and whitespace runs become `_`, so
/// `Repository Root` is stored as `repository_root`. Lines without a
/// `": "` separator are ignored.
pub(crate) fn parse_info_block(text: &str) -> Result<IndexMap<String, String>> {
    let pattern = compiled(&INFO_LINE)?;
    let mut info = IndexMap::new();
    for caps in pattern.captures_iter(text) {
        let key = caps[1]
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase();
        if key.is_empty() {
            continue;
        }
        info.insert(key, caps[2].to_string());
    }
    Ok(info)
}

/// Normalize `git branch -a` output into remote branch names.
///
/// Only `remotes/` entries are considered. The tracking prefix is
/// `remotes/origin/` for git and `remotes/` for git-svn, and `HEAD ->`
/// aliases are dropped.
pub(crate) fn normalize_branch_listing(text: &str, backend: Backend) -> Vec<String> {
    let prefix = match backend {
        Backend::Git => "remotes/origin/",
        Backend::Svn => "remotes/",
    };

    text.lines()
        .map(|line| line.trim_start_matches(['*', '+']).trim())
        .filter(|line| line.starts_with("remotes/"))
        .map(|line| line.strip_prefix(prefix).unwrap_or(line))
        .filter(|name| !name.starts_with("HEAD ->"))
        .map(String::from)
        .collect()
}

/// Extract `"N commits"` from `git status` when the branch lags its
/// `origin` counterpart.
pub(crate) fn parse_behind_count(status: &str, branch: &str) -> Result<Option<String>> {
    let pattern = Regex::new(&format!(
        r"Your branch is behind 'origin/{}' by (\d+\s+commits?)",
        regex::escape(branch)
    ))?;
    Ok(pattern
        .captures(status)
        .map(|caps| caps[1].split_whitespace().collect::<Vec<_>>().join(" ")))
}

/// Branch named on the `On branch` line of `git status`.
pub(crate) fn parse_on_branch(status: &str) -> Result<Option<String>> {
    let pattern = compiled(&ON_BRANCH)?;
    Ok(pattern
        .captures(status)
        .map(|caps| caps[1].to_string())
        .filter(|name| !name.is_empty()))
}

/// Branch named in the decoration of `git log --decorate -1`.
///
/// A remote-tracking label wins over a local one; the `origin/` prefix is
/// removed. `HEAD` and `tag:` labels never name a branch.
pub(crate) fn parse_decorated_branch(log: &str) -> Result<Option<String>> {
    let pattern = compiled(&DECORATED_COMMIT)?;
    let Some(caps) = pattern.captures(log) else {
        return Ok(None);
    };

    let labels: Vec<&str> = caps[1]
        .split(',')
        .map(str::trim)
        .map(|label| label.strip_prefix("HEAD -> ").unwrap_or(label))
        .filter(|label| !label.is_empty())
        .filter(|label| !label.ends_with("HEAD"))
        .filter(|label| !label.starts_with("tag: "))
        .collect();

    let chosen = labels
        .iter()
        .find(|label| label.contains("origin/"))
        .or_else(|| labels.first());

    Ok(chosen.map(|label| label.strip_prefix("origin/").unwrap_or(label).to_string()))
}

/// Logical branch name of a git-svn workspace.
///
/// The branch is hidden in the svn URL layout: the repository root, the
/// separator and the branch prefix (`branches` by default) are removed.
/// `trunk` and `tags/<name>` come through as-is.
pub(crate) fn svn_branch_name(info: &IndexMap<String, String>, prefix: &str) -> Option<String> {
    let url = info.get("url")?;
    let root = info.get("repository_root").map(String::as_str).unwrap_or("");

    let path = url.strip_prefix(root).unwrap_or(url);
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(path);

    Some(path.to_string())
}

/// Commit key for git-svn: `<sha>:<revision>`.
pub(crate) fn commit_key(sha: &str, revision: &str) -> String {
    format!("{sha}:{revision}")
}

/// Remove duplicates, keeping the first occurrence.
pub(crate) fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// First whitespace-separated token of the first non-empty line.
pub(crate) fn first_token(text: &str) -> Option<&str> {
    text.lines()
        .find(|line| !line.trim().is_empty())
        .and_then(|line| line.split_whitespace().next())
}
