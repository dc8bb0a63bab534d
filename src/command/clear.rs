use crate::error::Result;
use crate::output::Output;
use crate::workspace::Workspace;

/// Execute the `clear` subcommand.
pub(crate) fn run(workspace: &Workspace, output: &Output) -> Result<()> {
    if !workspace.root().exists() {
        return Ok(());
    }
    workspace.clear()?;
    output.success(&format!("Cleared {}", workspace.root().display()));
    Ok(())
}
