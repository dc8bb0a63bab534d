use crate::cli::ConfigureArgs;
use crate::error::Result;
use crate::output::Output;
use crate::workspace::Workspace;

/// Execute the `configure` subcommand.
pub(crate) fn run(args: ConfigureArgs, workspace: &Workspace, output: &Output) -> Result<()> {
    let backend = workspace.configure(&args.source_spec())?;
    output.success(&format!(
        "Configured {} workspace at {}",
        backend,
        workspace.root().display()
    ));
    Ok(())
}
