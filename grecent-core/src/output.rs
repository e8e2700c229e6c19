//! # Output Formatting
//!
//! Styled terminal output for the handful of messages grecent prints itself.

use owo_colors::OwoColorize;
use owo_colors::Stream::{Stderr, Stdout};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply this mode as the process-wide colour override.
  pub fn apply(self) {
    match self {
      Self::Always | Self::Yes => owo_colors::set_override(true),
      Self::Never | Self::No => owo_colors::set_override(false),
      // Leave detection to owo-colors
      Self::Auto => {}
    }
  }
}

/// Print one of the fixed failure messages on stdout, exactly as given.
pub fn print_failure(message: &str) {
  println!("{}", message.if_supports_color(Stdout, |text| text.red()));
}

/// Print an unexpected error on stderr.
pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    "✗".if_supports_color(Stderr, |text| text.red().bold().to_string()),
    message
  );
}

/// Print a branch name as part of a listing.
pub fn print_branch(name: &str) {
  println!("{name}");
}
