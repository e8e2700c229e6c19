//! Git repository management for testing
//!
//! Temporary repositories whose initial branch is always `main`, plus helpers
//! for committing with fixed timestamps so that `--sort=-committerdate`
//! listings come out in a known order.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use git2::{BranchType, Repository, RepositoryInitOptions, Signature, Time};
use tempfile::TempDir;

/// Name of the branch every test repository starts on.
pub const INITIAL_BRANCH: &str = "main";

/// A temporary git repository that is deleted when the guard is dropped.
pub struct GitRepoTestGuard {
  /// The temporary directory containing the git repository
  pub temp_dir: TempDir,
  /// The git repository
  pub repo: Repository,
}

impl GitRepoTestGuard {
  /// Create a new test git repository on an unborn `main` branch.
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");

    let mut options = RepositoryInitOptions::new();
    options.initial_head(INITIAL_BRANCH);
    let repo = Repository::init_opts(temp_dir.path(), &options).expect("Failed to initialize git repository");

    // Set test user configuration
    let mut config = repo.config().expect("Failed to get repository config");
    config
      .set_str("user.name", "Grecent Test User")
      .expect("Failed to set user.name");
    config
      .set_str("user.email", "grecent-test@example.com")
      .expect("Failed to set user.email");

    assert!(
      temp_dir.path().join(".git").exists(),
      "Git repository was not properly initialized"
    );

    Self { temp_dir, repo }
  }

  /// Get the path to the git repository
  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }
}

impl Default for GitRepoTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

/// Write `file_name`, stage it and commit on HEAD with author and committer
/// time set to `epoch_seconds`.
pub fn create_commit_at(
  repo: &Repository,
  file_name: &str,
  content: &str,
  message: &str,
  epoch_seconds: i64,
) -> Result<()> {
  let workdir = repo.workdir().context("Repository has no working directory")?;
  fs::write(workdir.join(file_name), content)?;

  let mut index = repo.index()?;
  index.add_path(Path::new(file_name))?;
  index.write()?;

  let tree = repo.find_tree(index.write_tree()?)?;
  let signature = Signature::new(
    "Grecent Test User",
    "grecent-test@example.com",
    &Time::new(epoch_seconds, 0),
  )?;

  let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
  let parents: Vec<_> = parent.iter().collect();
  repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;

  Ok(())
}

/// Helper function to create a branch in a repository
pub fn create_branch(repo: &Repository, branch_name: &str, start_point: Option<&str>) -> Result<()> {
  let head = if let Some(start) = start_point {
    repo
      .find_branch(start, BranchType::Local)?
      .into_reference()
      .peel_to_commit()?
  } else {
    repo.head()?.peel_to_commit()?
  };

  repo.branch(branch_name, &head, false)?;
  Ok(())
}

/// Helper function to checkout a branch
pub fn checkout_branch(repo: &Repository, branch_name: &str) -> Result<()> {
  let refname = format!("refs/heads/{branch_name}");
  let commit = repo.revparse_single(&refname)?.peel_to_commit()?;

  repo.checkout_tree(commit.as_object(), Some(git2::build::CheckoutBuilder::new().safe()))?;
  repo.set_head(&refname)?;

  Ok(())
}

/// Read the short name HEAD currently points at.
pub fn head_branch(path: &Path) -> Result<String> {
  let repo = Repository::open(path)?;
  let head = repo.head()?;
  head
    .shorthand()
    .map(str::to_string)
    .context("HEAD has no shorthand name")
}
