mod cli;
mod color;
mod command;
mod config;
mod error;
mod normalize;
mod output;
mod runner;
mod vcs;
mod workdir;
mod workspace;

use std::fs::OpenOptions;
use std::path;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};

use config::{Overrides, Settings};
use error::Result;
use output::Output;
use workspace::Workspace;

// Flag to indicate if a termination signal was received
static SIGNAL_RECEIVED: AtomicBool = AtomicBool::new(false);

fn setup_signal_handlers() {
    // ctrlc handles SIGINT (Ctrl+C) on all platforms
    // With `termination` feature, also handles SIGTERM and SIGHUP on Unix
    let _ = ctrlc::set_handler(|| {
        SIGNAL_RECEIVED.store(true, Ordering::SeqCst);
    });
}

/// Route `log` records to stderr, or to the configured log file.
fn init_logging(settings: &Settings) -> Result<()> {
    let default_filter = if settings.verbose { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = &settings.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    // Only fails if a logger is already installed.
    let _ = builder.try_init();
    Ok(())
}

fn run(args: cli::Cli) -> Result<()> {
    let cli::Cli { global, command: subcommand } = args;

    let color_choice = if global.no_color {
        clap::ColorChoice::Never
    } else {
        global.color
    };
    let color_config = color::ColorConfig::new(color_choice);

    let file_config = config::load(global.config.as_deref())?;
    let settings = Settings::resolve(
        Overrides {
            verbose: global.verbose,
            branch_prefix: global.branch_prefix,
            log_file: global.log_file,
        },
        file_config,
    )?;
    init_logging(&settings)?;

    let output = Output::with_color(settings.verbose, color_config);
    let root = path::absolute(&global.workspace)?;
    log::debug!("workspace {}", root.display());
    let workspace = Workspace::open(root, settings, output.clone());

    match subcommand {
        cli::Command::Configure(configure_args) => {
            command::configure(configure_args, &workspace, &output)
        }
        cli::Command::Clear => command::clear(&workspace, &output),
        cli::Command::Checkout { branch } => command::checkout(&branch, &workspace, &output),
        cli::Command::Move { tag } => command::move_to(&tag, &workspace, &output),
        cli::Command::Fetch => command::fetch(&workspace, &output),
        cli::Command::Status => command::status(&workspace, &output),
        cli::Command::Branches => command::branches(&workspace, &output),
        cli::Command::Tags => command::tags(&workspace, &output),
        cli::Command::CurrentBranch => command::current_branch(&workspace, &output),
        cli::Command::CurrentTags => command::current_tags(&workspace, &output),
        cli::Command::CommitKey => command::commit_key(&workspace, &output),
        cli::Command::Sha => command::sha(&workspace, &output),
        cli::Command::Url => command::url(&workspace, &output),
        cli::Command::Remotes => command::remotes(&workspace, &output),
        cli::Command::Backend => command::backend(&workspace, &output),
        cli::Command::Info(info_args) => command::info(info_args, &workspace, &output),
        cli::Command::Options => command::options(&output),
        cli::Command::Completions { shell } => command::completions(shell),
        cli::Command::Man => command::man(),
    }
}

fn main() -> ExitCode {
    setup_signal_handlers();

    let result = run(cli::parse());

    // Check if a signal was received
    if SIGNAL_RECEIVED.load(Ordering::SeqCst) {
        // Exit with 130 (128 + SIGINT) - standard for Ctrl+C termination
        return ExitCode::from(130);
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
