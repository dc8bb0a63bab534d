//! git-svn backend implementation.
//!
//! The workspace is a git mirror of a Subversion repository. Revisions are
//! resolved with `git svn find-rev`, and the branch layout is read back from
//! `git svn info`.

use super::git::UP_TO_DATE;
use super::options::expand_options;
use super::{Backend, Context, ScmProvider};
use crate::error::{Error, Result};
use crate::normalize;

use indexmap::IndexMap;

/// Attempts made by [`SvnProvider::commit_key`] before giving up.
pub(crate) const MAX_REVISION_LOOKUPS: u32 = 10;

/// git-svn backend provider.
pub(crate) struct SvnProvider<'a> {
    ctx: Context<'a>,
}

impl<'a> SvnProvider<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }

    /// Normalized `git svn info` block.
    pub fn info(&self) -> Result<IndexMap<String, String>> {
        let output = self.ctx.query(&["svn", "info"])?;
        normalize::parse_info_block(&output.stdout)
    }

    /// svn revision of `sha`; empty while git-svn has not indexed it yet.
    fn find_rev(&self, sha: &str) -> Result<String> {
        let output = self.ctx.query(&["svn", "find-rev", sha])?;
        Ok(output.trimmed().to_string())
    }

    fn commits_ahead_of(&self, sha: &str) -> Result<String> {
        let range = format!("{sha}..");
        let output = self
            .ctx
            .git(&["log", "--branches", "--format=%H", &range])?;
        Ok(output.stdout)
    }
}

impl ScmProvider for SvnProvider<'_> {
    fn kind(&self) -> Backend {
        Backend::Svn
    }

    fn clone_into(&self, url: &str, options: &[String]) -> Result<()> {
        let root = self.ctx.root.to_string_lossy();
        let options = expand_options(Backend::Svn, options);
        let mut args = vec!["svn", "clone", url, &*root];
        args.extend(options.iter().map(String::as_str));
        self.ctx.git(&args)?;
        Ok(())
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        // git-svn mirrors one branch at a time; there is no origin to reset to.
        self.ctx.git(&["checkout", branch])?;
        Ok(())
    }

    fn reset_hard(&self, _target: &str) -> Result<()> {
        Err(Error::UnsupportedOperation {
            operation: "reset --hard",
            backend: Backend::Svn,
        })
    }

    fn fetch(&self) -> Result<()> {
        self.ctx.git(&["svn", "fetch"])?;
        Ok(())
    }

    fn status(&self) -> Result<String> {
        let current_sha = self.ctx.current_sha()?;
        let log = self.commits_ahead_of(&current_sha)?;
        let count = log.lines().filter(|line| !line.trim().is_empty()).count();

        let Some(latest_sha) = normalize::first_token(&log) else {
            return Ok(UP_TO_DATE.to_string());
        };

        let current_rev = self.find_rev(&current_sha)?;
        let latest_rev = self.find_rev(latest_sha)?;
        Ok(format!(
            "There is/are {count} commits. current revision: {current_rev} latest revision: {latest_rev}"
        ))
    }

    fn commit_key(&self) -> Result<String> {
        let sha = self.ctx.current_sha()?;

        // The find-rev index can lag right after a clone or fetch.
        for attempt in 1..=MAX_REVISION_LOOKUPS {
            let revision = self.find_rev(&sha)?;
            if !revision.is_empty() {
                return Ok(normalize::commit_key(&sha, &revision));
            }
            log::warn!(
                "No svn revision for {sha} yet (attempt {attempt}/{MAX_REVISION_LOOKUPS})"
            );
            if attempt < MAX_REVISION_LOOKUPS {
                std::thread::sleep(self.ctx.settings.revision_retry_delay);
            }
        }

        Err(Error::RevisionLookupFailed {
            sha,
            attempts: MAX_REVISION_LOOKUPS,
        })
    }

    fn branch_names(&self) -> Result<Vec<String>> {
        let output = self.ctx.query(&["branch", "-a", "--no-color"])?;
        Ok(normalize::normalize_branch_listing(
            &output.stdout,
            Backend::Svn,
        ))
    }

    fn url(&self) -> Result<Option<String>> {
        Ok(self.info()?.swap_remove("repository_root"))
    }

    fn current_branch_name(&self) -> Result<Option<String>> {
        let info = self.info()?;
        Ok(normalize::svn_branch_name(
            &info,
            &self.ctx.settings.branch_prefix,
        ))
    }
}
