//! Branch checkout.

use std::path::Path;

use tracing::{debug, info};

use super::command;
use super::refs::BranchName;
use crate::error::Result;

/// Check out `branch` in the repository at `workdir` via `git checkout`.
///
/// Git's own output reaches the terminal untouched. The call waits for git
/// to exit but does not act on the outcome: a refused checkout (for example
/// because of local changes) is git's message to deliver, and grecent still
/// succeeds.
///
/// # Errors
///
/// Returns [`crate::GrecentError::GitSpawn`] only when git cannot be started.
pub async fn switch_branch(workdir: &Path, branch: &BranchName) -> Result<()> {
  info!(%branch, "Checking out branch");

  let status = command::passthrough(workdir, &["checkout", branch.as_str()]).await?;
  if !status.success() {
    debug!(%branch, ?status, "git checkout exited unsuccessfully");
  }

  Ok(())
}
