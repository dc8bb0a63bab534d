//! External command execution.
//!
//! Every interaction with git and git-svn goes through [`CommandRunner`], so
//! the workspace logic can be exercised against scripted output in tests.

use crate::error::{Error, Result};

use std::path::Path;
use std::process::Command;

/// Captured result of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// stdout followed by stderr.
    pub fn combined(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}{}", self.stdout, self.stderr),
        }
    }

    /// Non-empty stdout lines with surrounding whitespace removed.
    pub fn lines(&self) -> Vec<String> {
        self.stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()
    }

    /// Trimmed stdout.
    pub fn trimmed(&self) -> &str {
        self.stdout.trim()
    }
}

/// Runs an external program to completion in a given directory.
pub(crate) trait CommandRunner {
    /// Run `program` with `args` in `dir`.
    ///
    /// Fails only when the process cannot be started. A non-zero exit is
    /// reported through [`CommandOutput::code`].
    fn run(&self, program: &str, args: &[&str], dir: &Path) -> Result<CommandOutput>;

    /// Run and convert a non-zero exit into [`Error::CommandFailed`].
    fn run_checked(&self, program: &str, args: &[&str], dir: &Path) -> Result<CommandOutput> {
        let output = self.run(program, args, dir)?;
        if !output.success() {
            return Err(Error::CommandFailed {
                command: command_line(program, args),
                output: output.combined(),
            });
        }
        Ok(output)
    }
}

/// Render a command line for logs and error messages.
pub(crate) fn command_line(program: &str, args: &[&str]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Runner backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], dir: &Path) -> Result<CommandOutput> {
        log::debug!("run `{}` in {}", command_line(program, args), dir.display());

        // Output patterns are matched against the C locale messages.
        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .env("LC_ALL", "C")
            .output()?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            code: output.status.code(),
        };

        if !result.success() {
            log::debug!(
                "`{}` exited with {:?}",
                command_line(program, args),
                result.code
            );
        }

        Ok(result)
    }
}
