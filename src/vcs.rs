//! Backend abstraction layer.
//!
//! A workspace is driven either by git directly or by git-svn. This module
//! provides a unified interface over both so the workspace controller never
//! branches on raw tool output itself.

mod detect;
mod git;
pub(crate) mod options;
mod svn;

pub(crate) use detect::{classify_url, classify_workspace, is_accessible};
pub(crate) use git::GitProvider;
pub(crate) use svn::SvnProvider;

use crate::config::Settings;
use crate::error::Result;
use crate::output::Output;
use crate::runner::{CommandOutput, CommandRunner, command_line};

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Name of the control directory whose presence marks a configured workspace.
pub(crate) const MARKER_DIR: &str = ".git";

/// Directory under [`MARKER_DIR`] that git-svn maintains.
pub(crate) const SVN_MARKER_DIR: &str = "svn";

/// Backend driving a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Backend {
    /// Native git repository with an `origin` remote.
    Git,
    /// Subversion repository mirrored through git-svn.
    Svn,
}

impl Backend {
    /// Returns the display name for this backend.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Git => "git",
            Backend::Svn => "svn",
        }
    }

    /// Returns how the backend reaches its repository.
    pub fn mode(&self) -> &'static str {
        match self {
            Backend::Git => "distributed",
            Backend::Svn => "bridged",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a provider needs to run commands against one workspace.
#[derive(Clone, Copy)]
pub(crate) struct Context<'a> {
    pub root: &'a Path,
    pub runner: &'a dyn CommandRunner,
    pub settings: &'a Settings,
    pub output: &'a Output,
}

impl<'a> Context<'a> {
    /// Run a state-changing git command in the workspace root.
    pub fn git(&self, args: &[&str]) -> Result<CommandOutput> {
        let line = command_line("git", args);
        log::info!("{line}");
        self.output.command(&line);
        let output = self.runner.run_checked("git", args, self.root)?;
        self.output.command_output(&output.combined());
        Ok(output)
    }

    /// Run a read-only git command, failing on non-zero exit.
    pub fn query(&self, args: &[&str]) -> Result<CommandOutput> {
        self.runner.run_checked("git", args, self.root)
    }

    /// Run a read-only git command whose failure the caller handles.
    pub fn query_unchecked(&self, args: &[&str]) -> Result<CommandOutput> {
        self.runner.run("git", args, self.root)
    }

    /// Hash of the checked-out commit.
    pub fn current_sha(&self) -> Result<String> {
        Ok(self.query(&["rev-parse", "HEAD"])?.trimmed().to_string())
    }

    /// Names of configured remotes. A failing `git remote` counts as none.
    pub fn remotes(&self) -> Result<Vec<String>> {
        let output = self.query_unchecked(&["remote"])?;
        if !output.success() {
            return Ok(Vec::new());
        }
        Ok(output.lines())
    }
}

/// Backend-specific operations.
///
/// Implementations translate each workspace operation into the command
/// sequence of one backend and normalize the results.
pub(crate) trait ScmProvider {
    /// Get the backend kind.
    fn kind(&self) -> Backend;

    /// Get the backend name for display.
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Clone `url` into the workspace root, forwarding clone options.
    fn clone_into(&self, url: &str, options: &[String]) -> Result<()>;

    /// Check out `branch`.
    fn checkout(&self, branch: &str) -> Result<()>;

    /// Hard-reset the current branch to `target`.
    fn reset_hard(&self, target: &str) -> Result<()>;

    /// Refresh remote state without touching the working tree.
    fn fetch(&self) -> Result<()>;

    /// Human-readable summary of how far the workspace lags behind.
    fn status(&self) -> Result<String>;

    /// Canonical identity of the checked-out commit.
    fn commit_key(&self) -> Result<String>;

    /// Remote branch names with tracking prefixes removed.
    fn branch_names(&self) -> Result<Vec<String>>;

    /// URL the workspace was cloned from.
    fn url(&self) -> Result<Option<String>>;

    /// Logical name of the checked-out branch.
    fn current_branch_name(&self) -> Result<Option<String>>;
}

/// Get the provider for `backend`.
pub(crate) fn provider<'a>(backend: Backend, ctx: Context<'a>) -> Box<dyn ScmProvider + 'a> {
    match backend {
        Backend::Git => Box::new(GitProvider::new(ctx)),
        Backend::Svn => Box::new(SvnProvider::new(ctx)),
    }
}
