//! Git backend implementation.
//!
//! The workspace is a plain clone whose remote is `origin`.

use super::{Backend, Context, ScmProvider};
use crate::error::Result;
use crate::normalize;

/// Git backend provider.
pub(crate) struct GitProvider<'a> {
    ctx: Context<'a>,
}

impl<'a> GitProvider<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }

    fn symbolic_head(&self) -> Result<Option<String>> {
        let output = self.ctx.query_unchecked(&["symbolic-ref", "--short", "HEAD"])?;
        if !output.success() {
            return Ok(None);
        }
        Ok(non_empty(output.trimmed()))
    }

    fn status_branch(&self) -> Result<Option<String>> {
        let output = self.ctx.query_unchecked(&["status"])?;
        if !output.success() {
            return Ok(None);
        }
        normalize::parse_on_branch(&output.stdout)
    }

    fn decorated_branch(&self) -> Result<Option<String>> {
        let output = self
            .ctx
            .query_unchecked(&["log", "--decorate", "--no-color", "-1"])?;
        if !output.success() {
            return Ok(None);
        }
        normalize::parse_decorated_branch(&output.stdout)
    }
}

impl ScmProvider for GitProvider<'_> {
    fn kind(&self) -> Backend {
        Backend::Git
    }

    fn clone_into(&self, url: &str, options: &[String]) -> Result<()> {
        let root = self.ctx.root.to_string_lossy();
        let mut args = vec!["clone"];
        args.extend(options.iter().map(String::as_str));
        args.push(url);
        args.push(&*root);
        self.ctx.git(&args)?;
        Ok(())
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.ctx.git(&["checkout", branch])?;
        // A plain checkout leaves a stale local branch behind its remote.
        let remote_branch = format!("origin/{branch}");
        self.ctx.git(&["reset", "--hard", &remote_branch])?;
        Ok(())
    }

    fn reset_hard(&self, target: &str) -> Result<()> {
        self.ctx.git(&["reset", "--hard", target])?;
        Ok(())
    }

    fn fetch(&self) -> Result<()> {
        self.ctx.git(&["fetch", "origin"])?;
        Ok(())
    }

    fn status(&self) -> Result<String> {
        let branch = self.current_branch_name()?.unwrap_or_default();
        let status = self.ctx.git(&["status"])?;
        let summary = match normalize::parse_behind_count(&status.stdout, &branch)? {
            Some(count) => format!("There is/are {count}"),
            None => UP_TO_DATE.to_string(),
        };
        Ok(summary)
    }

    fn commit_key(&self) -> Result<String> {
        self.ctx.current_sha()
    }

    fn branch_names(&self) -> Result<Vec<String>> {
        let output = self.ctx.query(&["branch", "-a", "--no-color"])?;
        Ok(normalize::normalize_branch_listing(
            &output.stdout,
            Backend::Git,
        ))
    }

    fn url(&self) -> Result<Option<String>> {
        let output = self
            .ctx
            .query_unchecked(&["config", "--get", "remote.origin.url"])?;
        if !output.success() {
            return Ok(None);
        }
        Ok(non_empty(output.trimmed()))
    }

    fn current_branch_name(&self) -> Result<Option<String>> {
        // A detached or freshly reset HEAD has no symbolic ref, so fall back
        // to the status line and then to the log decoration.
        if let Some(name) = self.symbolic_head()? {
            return Ok(Some(name));
        }
        if let Some(name) = self.status_branch()? {
            return Ok(Some(name));
        }
        self.decorated_branch()
    }
}

/// Status summary when nothing is pending.
pub(crate) const UP_TO_DATE: &str = "everything is up-to-dated.";

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
