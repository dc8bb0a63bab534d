//! Read-only subcommands.
//!
//! Each prints nothing for a workspace that has not been configured.

use crate::error::Result;
use crate::output::Output;
use crate::workspace::Workspace;

pub(crate) fn status(workspace: &Workspace, output: &Output) -> Result<()> {
    if workspace.configured() {
        output.value(&workspace.status()?);
    }
    Ok(())
}

pub(crate) fn branches(workspace: &Workspace, output: &Output) -> Result<()> {
    let colors = output.colors();
    let names: Vec<String> = workspace
        .branch_names()?
        .iter()
        .map(|name| colors.branch(name))
        .collect();
    output.list(&names);
    Ok(())
}

pub(crate) fn tags(workspace: &Workspace, output: &Output) -> Result<()> {
    print_tags(&workspace.tag_names()?, output);
    Ok(())
}

pub(crate) fn current_tags(workspace: &Workspace, output: &Output) -> Result<()> {
    print_tags(&workspace.current_tag_names()?, output);
    Ok(())
}

fn print_tags(tags: &[String], output: &Output) {
    let colors = output.colors();
    let tags: Vec<String> = tags.iter().map(|tag| colors.tag(tag)).collect();
    output.list(&tags);
}

pub(crate) fn current_branch(workspace: &Workspace, output: &Output) -> Result<()> {
    if let Some(name) = workspace.current_branch_name()? {
        output.value(&output.colors().branch(&name));
    }
    Ok(())
}

pub(crate) fn commit_key(workspace: &Workspace, output: &Output) -> Result<()> {
    if let Some(key) = workspace.current_commit_key()? {
        output.value(&output.colors().hash(&key));
    }
    Ok(())
}

pub(crate) fn sha(workspace: &Workspace, output: &Output) -> Result<()> {
    if let Some(sha) = workspace.current_sha()? {
        output.value(&output.colors().hash(&sha));
    }
    Ok(())
}

pub(crate) fn url(workspace: &Workspace, output: &Output) -> Result<()> {
    if let Some(url) = workspace.url()? {
        output.value(&url);
    }
    Ok(())
}

pub(crate) fn remotes(workspace: &Workspace, output: &Output) -> Result<()> {
    output.list(&workspace.remotes()?);
    Ok(())
}

pub(crate) fn backend(workspace: &Workspace, output: &Output) -> Result<()> {
    if let Some(backend) = workspace.backend()? {
        output.value(backend.name());
    }
    Ok(())
}
