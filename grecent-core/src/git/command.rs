//! Helpers for spawning git sub-processes on the tokio runtime.

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::{debug, trace};

use crate::consts;
use crate::error::{GrecentError, Result};

/// Captured result of a git invocation.
#[derive(Debug)]
pub(super) struct GitOutput {
  pub stdout: String,
  pub success: bool,
}

fn describe(args: &[&str]) -> String {
  format!("{} {}", consts::GIT_EXECUTABLE, args.join(" "))
}

fn base_command(workdir: &Path, args: &[&str]) -> Command {
  let mut command = Command::new(consts::GIT_EXECUTABLE);
  command.args(args).current_dir(workdir).kill_on_drop(true);
  command
}

/// Run a git command and capture its output.
///
/// Only the exit status decides success. Anything written to stderr is logged
/// and otherwise ignored, since git emits advisory warnings on successful runs.
pub(super) async fn capture(workdir: &Path, args: &[&str]) -> Result<GitOutput> {
  let command_line = describe(args);
  trace!(command = %command_line, "Running git");

  let output = base_command(workdir, args)
    .stdin(Stdio::null())
    .output()
    .await
    .map_err(|source| GrecentError::GitSpawn {
      command: command_line.clone(),
      source,
    })?;

  let stderr = String::from_utf8_lossy(&output.stderr);
  if !stderr.trim().is_empty() {
    debug!(command = %command_line, stderr = %stderr.trim(), "git wrote to stderr");
  }

  Ok(GitOutput {
    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
    success: output.status.success(),
  })
}

/// Run a git command with inherited stdin/stdout/stderr and wait for it.
pub(super) async fn passthrough(workdir: &Path, args: &[&str]) -> Result<ExitStatus> {
  let command_line = describe(args);
  trace!(command = %command_line, "Running git with inherited stdio");

  base_command(workdir, args)
    .stdin(Stdio::inherit())
    .stdout(Stdio::inherit())
    .stderr(Stdio::inherit())
    .status()
    .await
    .map_err(|source| GrecentError::GitSpawn {
      command: command_line,
      source,
    })
}
