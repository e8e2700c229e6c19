//! # Interactive Branch Selection
//!
//! Two ways of picking a branch from the candidate list: a plain paged list
//! and a fuzzy-filterable list. Both return `Ok(None)` when the user cancels.

pub mod fuzzy;
mod plain;

use anyhow::Result;
use grecent_core::BranchName;

/// Which prompt to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
  /// Arrow-key navigation over the full list
  #[default]
  Plain,
  /// Type to narrow the list by fuzzy matching
  Fuzzy,
}

/// Prompt the user for one of `branches`.
///
/// # Errors
///
/// Returns an error when the terminal cannot be driven.
pub fn select_branch(branches: &[BranchName], mode: SelectionMode) -> Result<Option<BranchName>> {
  if branches.is_empty() {
    return Ok(None);
  }

  match mode {
    SelectionMode::Plain => plain::select(branches),
    SelectionMode::Fuzzy => fuzzy::FuzzySelector::new(branches).run(),
  }
}
