use crate::color::{ColorConfig, ColorScheme};

/// Output manager that respects verbose mode.
#[derive(Debug, Clone)]
pub(crate) struct Output {
    verbose: bool,
    colors: ColorScheme,
}

impl Output {
    /// Create a new Output instance without colors.
    #[cfg(test)]
    pub fn new(verbose: bool) -> Self {
        Self::with_color(verbose, ColorConfig::disabled())
    }

    pub fn with_color(verbose: bool, color: ColorConfig) -> Self {
        Self {
            verbose,
            colors: color.scheme(),
        }
    }

    pub fn colors(&self) -> ColorScheme {
        self.colors
    }

    /// Echo a command line before it runs (verbose only).
    pub fn command(&self, line: &str) {
        if self.verbose {
            println!("{}", self.colors.command(&format!("$ {line}")));
        }
    }

    /// Echo captured command output (verbose only).
    pub fn command_output(&self, text: &str) {
        if self.verbose && !text.trim().is_empty() {
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
        }
    }

    /// Print a single value.
    pub fn value(&self, value: &str) {
        println!("{value}");
    }

    /// Print one item per line.
    pub fn list(&self, items: &[String]) {
        for item in items {
            println!("{item}");
        }
    }

    /// Print a labelled field.
    pub fn field(&self, label: &str, value: &str) {
        println!("{} {value}", self.colors.header(&format!("{label}:")));
    }

    /// Print a success message.
    pub fn success(&self, message: &str) {
        println!("{}", self.colors.success(message));
    }

    /// Print a warning.
    pub fn warning(&self, message: &str) {
        eprintln!("{}", self.colors.warning(&format!("Warning: {message}")));
    }
}
