//! Workspace controller.
//!
//! A [`Workspace`] owns one directory. Every state-dependent operation
//! resolves the backend by probing that directory, then delegates to the
//! matching provider. Read-only queries return `None` or an empty list for a
//! workspace that has not been configured.

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::normalize;
use crate::output::Output;
use crate::runner::{CommandRunner, SystemRunner};
use crate::vcs::options::SourceSpec;
use crate::vcs::{self, Backend, Context, ScmProvider, SvnProvider};
use crate::workdir::WorkingDir;

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use walkdir::WalkDir;

/// Snapshot of what a workspace has checked out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct CommitInfo {
    pub backend: Backend,
    pub url: Option<String>,
    pub branch: Option<String>,
    pub commit_key: String,
    pub captured_at: DateTime<Utc>,
}

/// A single working copy driven by git or git-svn.
pub(crate) struct Workspace<R: CommandRunner = SystemRunner> {
    root: PathBuf,
    settings: Settings,
    runner: R,
    output: Output,
}

impl Workspace<SystemRunner> {
    /// Open a workspace that runs the real `git` binary.
    pub fn open(root: impl Into<PathBuf>, settings: Settings, output: Output) -> Self {
        Self::new(root, settings, SystemRunner, output)
    }
}

impl<R: CommandRunner> Workspace<R> {
    /// A relative `root` is resolved against the current directory once, so
    /// `clear` can change directory without losing track of the workspace.
    pub fn new(root: impl Into<PathBuf>, settings: Settings, runner: R, output: Output) -> Self {
        let root = root.into();
        let root = std::path::absolute(&root).unwrap_or(root);
        Self {
            root,
            settings,
            runner,
            output,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    #[cfg(test)]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn ctx(&self) -> Context<'_> {
        Context {
            root: &self.root,
            runner: &self.runner,
            settings: &self.settings,
            output: &self.output,
        }
    }

    /// Whether the control directory exists.
    pub fn accessible(&self) -> bool {
        vcs::is_accessible(&self.root)
    }

    /// Whether the workspace holds a clone.
    ///
    /// Currently identical to [`Workspace::accessible`]; both names are kept
    /// because callers ask the two questions for different reasons.
    pub fn configured(&self) -> bool {
        self.accessible()
    }

    pub fn cleared(&self) -> bool {
        !self.configured()
    }

    /// Backend of the workspace, `None` when not accessible.
    pub fn backend(&self) -> Result<Option<Backend>> {
        vcs::classify_workspace(&self.ctx())
    }

    pub fn is_git(&self) -> Result<bool> {
        Ok(self.backend()? == Some(Backend::Git))
    }

    pub fn is_svn(&self) -> Result<bool> {
        Ok(self.backend()? == Some(Backend::Svn))
    }

    fn provider(&self) -> Result<Option<Box<dyn ScmProvider + '_>>> {
        Ok(self
            .backend()?
            .map(|backend| vcs::provider(backend, self.ctx())))
    }

    fn require_provider(&self) -> Result<Box<dyn ScmProvider + '_>> {
        self.provider()?.ok_or_else(|| Error::NotConfigured {
            path: self.root.clone(),
        })
    }

    /// Clone a `"<url> [options...]"` source spec into the empty workspace.
    pub fn configure(&self, source: &str) -> Result<Backend> {
        if !self.is_empty()? {
            let listing = if self.settings.verbose {
                Some(self.listing())
            } else {
                None
            };
            return Err(Error::AlreadyConfigured {
                path: self.root.clone(),
                listing,
            });
        }

        let spec = SourceSpec::parse(source);
        let backend = vcs::classify_url(&spec.url).ok_or_else(|| Error::UnknownBackend {
            url: spec.url.clone(),
        })?;

        log::info!(
            "configure {} workspace {} from {}",
            backend,
            self.root.display(),
            spec.url
        );
        fs::create_dir_all(&self.root)?;
        vcs::provider(backend, self.ctx()).clone_into(&spec.url, &spec.options)?;

        match self.backend() {
            Ok(Some(found)) if found == backend => {}
            Ok(found) => self.output.warning(&format!(
                "{} was cloned as {backend} but is detected as {}",
                self.root.display(),
                found.map_or("nothing", |b| b.name())
            )),
            Err(e) => self.output.warning(&e.to_string()),
        }

        Ok(backend)
    }

    /// Remove everything under the root. A missing root is left alone.
    pub fn clear(&self) -> Result<()> {
        if !self.root.exists() {
            return Ok(());
        }

        log::info!("clear {}", self.root.display());
        let _dir = WorkingDir::enter(&self.root)?;
        for entry in fs::read_dir(".")? {
            let entry = entry?;
            if is_dot_segment(&entry.file_name()) {
                continue;
            }
            remove_entry(&entry.path())?;
        }
        Ok(())
    }

    /// Check out `branch`; git also resets it to `origin/<branch>`.
    pub fn checkout(&self, branch: &str) -> Result<()> {
        let provider = self.require_provider()?;
        log::info!("checkout {branch} ({})", provider.name());
        provider.checkout(branch)
    }

    /// Hard-reset the current branch to `tag`. Not available for git-svn.
    pub fn reset_hard(&self, tag: &str) -> Result<()> {
        let provider = self.require_provider()?;
        log::info!("reset --hard {tag} ({})", provider.name());
        provider.reset_hard(tag)
    }

    /// Same as [`Workspace::reset_hard`].
    pub fn move_to(&self, tag: &str) -> Result<()> {
        self.reset_hard(tag)
    }

    pub fn fetch(&self) -> Result<()> {
        let provider = self.require_provider()?;
        log::info!("fetch ({})", provider.name());
        provider.fetch()
    }

    pub fn status(&self) -> Result<String> {
        self.require_provider()?.status()
    }

    pub fn current_sha(&self) -> Result<Option<String>> {
        if !self.accessible() {
            return Ok(None);
        }
        self.ctx().current_sha().map(Some)
    }

    /// `<sha>` for git, `<sha>:<revision>` for git-svn.
    pub fn current_commit_key(&self) -> Result<Option<String>> {
        match self.provider()? {
            Some(provider) => provider.commit_key().map(Some),
            None => Ok(None),
        }
    }

    pub fn branch_names(&self) -> Result<Vec<String>> {
        match self.provider()? {
            Some(provider) => provider.branch_names(),
            None => Ok(Vec::new()),
        }
    }

    pub fn tag_names(&self) -> Result<Vec<String>> {
        if !self.accessible() {
            return Ok(Vec::new());
        }
        let output = self.ctx().query(&["tag"])?;
        Ok(normalize::dedup_preserving_order(output.lines()))
    }

    pub fn current_branch_name(&self) -> Result<Option<String>> {
        match self.provider()? {
            Some(provider) => provider.current_branch_name(),
            None => Ok(None),
        }
    }

    /// Tags pointing at the checked-out commit. A failed lookup yields none.
    pub fn current_tag_names(&self) -> Result<Vec<String>> {
        if !self.accessible() {
            return Ok(Vec::new());
        }
        let output = self
            .ctx()
            .query_unchecked(&["tag", "--points-at", "HEAD"])?;
        if !output.success() {
            log::debug!("tag lookup failed: {}", output.combined().trim());
            return Ok(Vec::new());
        }
        Ok(normalize::dedup_preserving_order(output.lines()))
    }

    pub fn url(&self) -> Result<Option<String>> {
        match self.provider()? {
            Some(provider) => provider.url(),
            None => Ok(None),
        }
    }

    pub fn remotes(&self) -> Result<Vec<String>> {
        if !self.accessible() {
            return Ok(Vec::new());
        }
        self.ctx().remotes()
    }

    /// Normalized `git svn info`, only for git-svn workspaces.
    pub fn svn_info(&self) -> Result<Option<IndexMap<String, String>>> {
        match self.backend()? {
            Some(Backend::Svn) => SvnProvider::new(self.ctx()).info().map(Some),
            _ => Ok(None),
        }
    }

    pub fn commit_info(&self) -> Result<Option<CommitInfo>> {
        let Some(provider) = self.provider()? else {
            return Ok(None);
        };
        Ok(Some(CommitInfo {
            backend: provider.kind(),
            url: provider.url()?,
            branch: provider.current_branch_name()?,
            commit_key: provider.commit_key()?,
            captured_at: Utc::now(),
        }))
    }

    fn is_empty(&self) -> Result<bool> {
        if !self.root.exists() {
            return Ok(true);
        }
        Ok(fs::read_dir(&self.root)?.next().is_none())
    }

    fn listing(&self) -> String {
        WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .map(|entry| {
                let marker = if entry.path_is_symlink() {
                    'l'
                } else if entry.file_type().is_dir() {
                    'd'
                } else {
                    'f'
                };
                format!("{marker} {}", entry.file_name().to_string_lossy())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// `.`, `..` and other names made only of dots.
fn is_dot_segment(name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    !name.is_empty() && name.chars().all(|c| c == '.')
}

/// Remove a file, symlink or directory tree without following symlinks.
fn remove_entry(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path)?;
    if metadata.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(())
}
