//! Plain list prompt built on dialoguer.

use std::io;

use anyhow::{Context, Result};
use console::Term;
use dialoguer::Select;
use grecent_core::consts::SELECT_PROMPT;
use grecent_core::{BranchName, grecent_theme, page_size};

pub(super) fn select(branches: &[BranchName]) -> Result<Option<BranchName>> {
  let items: Vec<&str> = branches.iter().map(BranchName::as_str).collect();

  let selection = Select::with_theme(&grecent_theme())
    .with_prompt(SELECT_PROMPT)
    .items(&items)
    .default(0)
    .max_length(page_size(items.len()))
    .interact_opt();

  match selection {
    Ok(index) => Ok(branch_at(branches, index)),
    // Ctrl+C while the prompt owns the terminal; the cursor is still hidden.
    Err(dialoguer::Error::IO(err)) if err.kind() == io::ErrorKind::Interrupted => {
      Term::stderr().show_cursor().ok();
      Ok(None)
    }
    Err(err) => Err(err).context("Failed to display the branch prompt"),
  }
}

/// Map the prompt's answer back to a branch; `None` means the user cancelled.
fn branch_at(branches: &[BranchName], index: Option<usize>) -> Option<BranchName> {
  index.and_then(|index| branches.get(index).cloned())
}
