//! Subcommands that change what the workspace has checked out.

use crate::error::Result;
use crate::output::Output;
use crate::workspace::Workspace;

pub(crate) fn checkout(branch: &str, workspace: &Workspace, output: &Output) -> Result<()> {
    workspace.checkout(branch)?;
    let colors = output.colors();
    output.success(&format!("Checked out {}", colors.branch(branch)));
    Ok(())
}

pub(crate) fn move_to(tag: &str, workspace: &Workspace, output: &Output) -> Result<()> {
    workspace.move_to(tag)?;
    let colors = output.colors();
    output.success(&format!("Moved to {}", colors.tag(tag)));
    Ok(())
}

pub(crate) fn fetch(workspace: &Workspace, output: &Output) -> Result<()> {
    workspace.fetch()?;
    output.success("Fetched");
    Ok(())
}
