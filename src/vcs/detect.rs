//! Backend detection logic.
//!
//! A backend is determined twice: from the URL when a workspace is
//! configured, and from the workspace itself afterwards. The workspace
//! check is authoritative once a clone exists.

use super::{Backend, Context, MARKER_DIR, SVN_MARKER_DIR};
use crate::error::{Error, Result};

use std::path::Path;

/// Guess the backend from a repository URL.
///
/// Detection order:
/// 1. `git://` or `git@` scheme, or a `.git` suffix: git
/// 2. any URL mentioning `svn`: git-svn
pub(crate) fn classify_url(url: &str) -> Option<Backend> {
    if url.starts_with("git://") || url.starts_with("git@") || url.ends_with(".git") {
        return Some(Backend::Git);
    }
    if url.contains("svn") {
        return Some(Backend::Svn);
    }
    None
}

/// Whether the workspace control directory exists.
pub(crate) fn is_accessible(root: &Path) -> bool {
    root.join(MARKER_DIR).is_dir()
}

/// Inspect a workspace for its backend.
///
/// Returns `Ok(None)` when the workspace is not accessible. An accessible
/// workspace with neither a remote nor git-svn metadata is an error rather
/// than a guess.
pub(crate) fn classify_workspace(ctx: &Context<'_>) -> Result<Option<Backend>> {
    if !is_accessible(ctx.root) {
        return Ok(None);
    }

    if !ctx.remotes()?.is_empty() {
        return Ok(Some(Backend::Git));
    }

    if ctx.root.join(MARKER_DIR).join(SVN_MARKER_DIR).is_dir() {
        return Ok(Some(Backend::Svn));
    }

    Err(Error::UnresolvedBackend {
        path: ctx.root.to_path_buf(),
    })
}
