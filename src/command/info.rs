use crate::cli::InfoArgs;
use crate::error::Result;
use crate::output::Output;
use crate::workspace::{CommitInfo, Workspace};

/// Execute the `info` subcommand.
pub(crate) fn run(args: InfoArgs, workspace: &Workspace, output: &Output) -> Result<()> {
    let Some(info) = workspace.commit_info()? else {
        return Ok(());
    };

    if args.json {
        output.value(&serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    print_summary(&info, output);

    let tags = workspace.current_tag_names()?;
    if !tags.is_empty() {
        output.field("tags", &tags.join(", "));
    }

    if workspace.is_git()? {
        output.field("remotes", &workspace.remotes()?.join(", "));
    }

    if workspace.is_svn()?
        && let Some(svn_info) = workspace.svn_info()?
    {
        for key in ["revision", "last_changed_rev", "last_changed_author"] {
            if let Some(value) = svn_info.get(key) {
                output.field(key, value);
            }
        }
    }

    Ok(())
}

fn print_summary(info: &CommitInfo, output: &Output) {
    let colors = output.colors();
    output.field(
        "backend",
        &format!("{} ({})", info.backend, info.backend.mode()),
    );
    output.field("url", info.url.as_deref().unwrap_or("-"));
    output.field(
        "branch",
        &info
            .branch
            .as_deref()
            .map(|name| colors.branch(name))
            .unwrap_or_else(|| "-".to_string()),
    );
    output.field("commit", &colors.hash(&info.commit_key));
}
