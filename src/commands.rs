//! CLI command parsing
//!
//! Parses the first argument of `shade <command>`.

/// Parsed command from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the stored theme: status
    Status,
    /// Flip and store the theme: toggle
    Toggle,
    /// Forget the stored theme: reset
    Reset,
    /// Print the active palette as JSON: palette
    Palette,
    /// Show help: help
    Help,
    /// Anything else
    Unknown(String),
}

impl Command {
    /// Parse a command argument
    pub fn parse(input: &str) -> Self {
        let cmd = input.trim().to_lowercase();

        match cmd.as_str() {
            "status" | "st" => Command::Status,
            "toggle" | "t" => Command::Toggle,
            "reset" | "clear" => Command::Reset,
            "palette" | "colors" => Command::Palette,
            "help" | "--help" | "-h" => Command::Help,
            _ => Command::Unknown(input.trim().to_string()),
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r#"Shade - light/dark theme preview

Usage: shade [command]

Commands:
  (none)   Open the preview window (press T to toggle)
  status   Print the stored theme
  toggle   Flip and store the theme
  reset    Forget the stored theme
  palette  Print the active palette as JSON
  help     Show this help message"#
    }
}
