use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "scmws")]
#[command(about = "Drive a single git or git-svn working copy through one command set")]
#[command(version = VERSION_STRING)]
#[command(after_help = "\
BACKENDS:
    scmws picks the backend from the URL given to `configure`:
    - git://..., git@..., *.git      plain git clone
    - any other URL containing svn   git-svn bridge clone

    Afterwards the backend is detected from the workspace itself.

CONFIGURATION:
    scmws reads <config dir>/scmws/config.toml, or the file given with --config.

        verbose = false
        branch_prefix = \"branches\"
        log_file = \"/tmp/scmws.log\"
        revision_retry_delay_ms = 200

    Environment:
    SCMWS_VERBOSE        Same as --verbose
    SCMWS_BRANCH_PREFIX  Same as --branch-prefix
    RUST_LOG             Log filter (default: warn, or info with --verbose)
    NO_COLOR             When set to non-empty value, disables colors (https://no-color.org/)

    Priority: flags > environment > config file > defaults

EXAMPLES:
    scmws -C ~/ws configure git://github.com/akm/git_sandbox.git
        Clone a git repository into ~/ws

    scmws -C ~/ws configure file:///srv/svn/project -T trunk -b branches -t tags
        Bridge-clone an svn repository; short options are expanded

    scmws -C ~/ws checkout develop
        Check out develop and reset it to origin/develop

    scmws -C ~/ws status
        Report how many commits the workspace lags behind

    scmws -C ~/ws info --json
        Print backend, URL, branch and commit key as JSON")]
pub(crate) struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

const VERSION_STRING: &str = env!("SCMWS_VERSION_LABEL");

/// Options shared by every subcommand.
#[derive(Args, Debug)]
pub(crate) struct GlobalArgs {
    /// Workspace directory
    #[arg(
        short = 'C',
        long,
        value_name = "DIR",
        default_value = ".",
        global = true,
        help_heading = "Shared Options"
    )]
    pub workspace: PathBuf,

    /// Echo every command and its output
    #[arg(
        short,
        long,
        env = "SCMWS_VERBOSE",
        global = true,
        help_heading = "Shared Options"
    )]
    pub verbose: bool,

    /// svn path segment that holds branches
    #[arg(
        long,
        value_name = "PREFIX",
        env = "SCMWS_BRANCH_PREFIX",
        global = true,
        help_heading = "Shared Options"
    )]
    pub branch_prefix: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "FILE", global = true, help_heading = "Shared Options")]
    pub config: Option<PathBuf>,

    /// Write log records to this file instead of stderr
    #[arg(long, value_name = "FILE", global = true, help_heading = "Shared Options")]
    pub log_file: Option<PathBuf>,

    /// When to use colored output (always, auto, never)
    #[arg(
        long,
        value_name = "WHEN",
        default_value = "auto",
        conflicts_with = "no_color",
        global = true,
        help_heading = "Shared Options"
    )]
    pub color: clap::ColorChoice,

    /// Disable colored output (equivalent to --color=never)
    #[arg(long, global = true, help_heading = "Shared Options")]
    pub no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Clone a repository into the empty workspace
    Configure(ConfigureArgs),

    /// Remove everything inside the workspace
    Clear,

    /// Check out a branch
    Checkout {
        /// Branch name
        branch: String,
    },

    /// Hard-reset the current branch to a tag (git only)
    #[command(visible_alias = "reset-hard")]
    Move {
        /// Tag or commit to reset to
        tag: String,
    },

    /// Refresh remote state
    Fetch,

    /// Report how far the workspace lags behind its remote
    Status,

    /// List remote branch names
    Branches,

    /// List tag names
    Tags,

    /// Print the checked-out branch name
    CurrentBranch,

    /// List tags pointing at the checked-out commit
    CurrentTags,

    /// Print the commit key (sha, or sha:revision for git-svn)
    CommitKey,

    /// Print the checked-out commit hash
    Sha,

    /// Print the repository URL
    Url,

    /// List git remotes
    Remotes,

    /// Print the detected backend
    Backend,

    /// Summarize the workspace
    Info(InfoArgs),

    /// Show how short clone options are expanded
    Options,

    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// Generate man page
    Man,
}

/// Arguments for the `configure` subcommand.
#[derive(Parser, Debug)]
#[command(after_help = "\
CLONE OPTIONS:
    Everything after the URL is forwarded to the clone command.

    git:  passed to `git clone` verbatim
    svn:  passed to `git svn clone`; single-letter flags are expanded
          (-T trunk becomes --trunk trunk, -r1:HEAD becomes --revision=1:HEAD)

    Run `scmws options` for the full expansion table.")]
pub(crate) struct ConfigureArgs {
    /// Repository URL
    pub url: String,

    /// Options forwarded to the clone command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "OPTIONS")]
    pub options: Vec<String>,
}

impl ConfigureArgs {
    /// Rebuild the `"<url> [options...]"` source spec.
    pub fn source_spec(&self) -> String {
        std::iter::once(self.url.as_str())
            .chain(self.options.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Arguments for the `info` subcommand.
#[derive(Parser, Debug)]
pub(crate) struct InfoArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse CLI arguments.
pub(crate) fn parse() -> Cli {
    Cli::parse()
}

/// Build CLI for completion/man generation.
pub(crate) fn build() -> clap::Command {
    Cli::command()
}
