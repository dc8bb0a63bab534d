use std::io::IsTerminal;

use owo_colors::{AnsiColors, DynColors, Style};

/// Color configuration resolved from CLI flags and environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a new ColorConfig from CLI choice.
    ///
    /// Priority: --color flag > NO_COLOR env > terminal detection
    pub fn new(choice: clap::ColorChoice) -> Self {
        let enabled = match choice {
            clap::ColorChoice::Always => true,
            clap::ColorChoice::Never => false,
            clap::ColorChoice::Auto => {
                // Check NO_COLOR environment variable (https://no-color.org/)
                if let Ok(val) = std::env::var("NO_COLOR")
                    && !val.is_empty()
                {
                    return Self::disabled();
                }

                std::io::stdout().is_terminal()
            }
        };

        Self { enabled }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Color scheme bound to this configuration.
    pub fn scheme(self) -> ColorScheme {
        ColorScheme { enabled: self.enabled }
    }
}

/// Semantic colors for CLI output.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColorScheme {
    enabled: bool,
}

impl ColorScheme {
    pub fn command(&self, text: &str) -> String {
        self.apply(Style::new().dimmed(), text)
    }

    pub fn branch(&self, text: &str) -> String {
        self.apply(ansi(AnsiColors::Magenta), text)
    }

    pub fn tag(&self, text: &str) -> String {
        self.apply(ansi(AnsiColors::Cyan), text)
    }

    pub fn hash(&self, text: &str) -> String {
        self.apply(ansi(AnsiColors::Yellow), text)
    }

    pub fn success(&self, text: &str) -> String {
        self.apply(ansi(AnsiColors::Green), text)
    }

    pub fn warning(&self, text: &str) -> String {
        self.apply(ansi(AnsiColors::Yellow).bold(), text)
    }

    pub fn header(&self, text: &str) -> String {
        self.apply(ansi(AnsiColors::White).bold(), text)
    }

    fn apply(&self, style: Style, text: &str) -> String {
        if self.enabled {
            style.style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

fn ansi(color: AnsiColors) -> Style {
    Style::new().color(DynColors::Ansi(color))
}
