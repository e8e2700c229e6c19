//! Error types for branch discovery and switching.

use std::io;

use thiserror::Error;

/// Failures that stop the branch selection pipeline.
///
/// The first two variants carry the exact text shown to the user, so their
/// `Display` output must stay stable.
#[derive(Debug, Error)]
pub enum GrecentError {
  /// The working directory is not inside a git repository.
  #[error("Not in a git repository")]
  NotARepository,

  /// Excluding the current branch left nothing to choose from.
  #[error("There's only one branch in this repository")]
  SingleBranch,

  /// The git executable could not be started at all.
  #[error("Failed to execute `{command}`")]
  GitSpawn {
    /// Command line that was attempted.
    command: String,
    #[source]
    source: io::Error,
  },
}

impl GrecentError {
  /// Whether this error is one of the fixed, user-facing conditions that are
  /// reported on stdout.
  pub const fn is_user_facing(&self) -> bool {
    matches!(self, Self::NotARepository | Self::SingleBranch)
  }
}

/// Result alias used across grecent-core.
pub type Result<T, E = GrecentError> = std::result::Result<T, E>;
