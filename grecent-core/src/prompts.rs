//! # Prompts Module
//!
//! Provides the dialoguer theme and paging rules shared by grecent's
//! selection prompts.

use console::Style;
use dialoguer::theme::ColorfulTheme;

use crate::consts::MAX_PAGE_SIZE;

/// Returns the dialoguer theme used by the branch prompt.
///
/// Features:
/// - Cyan bold prompt text
/// - Green `❯` prefix on active item
/// - Green highlight on active item text
pub fn grecent_theme() -> ColorfulTheme {
  ColorfulTheme {
    prompt_style: Style::new().cyan().bold(),
    active_item_prefix: Style::new().green().apply_to("❯ ".to_string()),
    active_item_style: Style::new().green(),
    ..ColorfulTheme::default()
  }
}

/// Number of rows a prompt shows for `count` candidates.
pub const fn page_size(count: usize) -> usize {
  if count < MAX_PAGE_SIZE { count } else { MAX_PAGE_SIZE }
}
