//! Read-only repository queries.

use std::path::Path;

use tracing::{debug, info};

use super::command;
use super::refs::{BranchName, build_branch_list, parse_ref_line};
use crate::error::{GrecentError, Result};

/// Determine the currently checked-out branch of the repository at `workdir`.
///
/// HEAD is resolved to its full reference name, so a tag sharing the
/// branch's name cannot turn the answer into `heads/<name>`. A detached HEAD
/// resolves to no branch at all.
///
/// # Errors
///
/// Returns [`GrecentError::NotARepository`] when git cannot resolve `HEAD`
/// from `workdir`, and [`GrecentError::GitSpawn`] when git cannot be run.
pub async fn current_branch(workdir: &Path) -> Result<Option<BranchName>> {
  let output = command::capture(workdir, &["rev-parse", "--symbolic-full-name", "HEAD"]).await?;

  if !output.success {
    return Err(GrecentError::NotARepository);
  }

  let branch = parse_ref_line(&output.stdout);
  match &branch {
    Some(branch) => debug!(%branch, "Resolved current branch"),
    None => debug!(head = %output.stdout.trim(), "HEAD is detached"),
  }
  Ok(branch)
}

/// Fetch the raw listing of local branch references, most recently committed
/// first.
///
/// A failing query yields an empty listing.
///
/// # Errors
///
/// Returns [`GrecentError::GitSpawn`] when git cannot be run.
pub async fn branches_by_recency(workdir: &Path) -> Result<String> {
  let output = command::capture(
    workdir,
    &["for-each-ref", "--sort=-committerdate", "--format=%(refname)", "refs/heads"],
  )
  .await?;

  if output.success {
    Ok(output.stdout)
  } else {
    debug!("Branch listing failed, treating it as empty");
    Ok(String::new())
  }
}

/// Query both git facts concurrently and build the list of branches the user
/// can switch to.
///
/// # Errors
///
/// Fails with [`GrecentError::NotARepository`] as soon as the current branch
/// query fails (the listing query is dropped), and with
/// [`GrecentError::SingleBranch`] when no branch other than the current one
/// exists.
pub async fn candidate_branches(workdir: &Path) -> Result<Vec<BranchName>> {
  let (current, listing) = tokio::try_join!(current_branch(workdir), branches_by_recency(workdir))?;

  let branches = build_branch_list(current.as_ref().map(BranchName::as_str), &listing);
  info!(count = branches.len(), current = ?current, "Collected candidate branches");

  if branches.is_empty() {
    return Err(GrecentError::SingleBranch);
  }

  Ok(branches)
}

#[cfg(test)]
mod tests {
  use grecent_test_utils::git::{GitRepoTestGuard, checkout_branch, create_branch, create_commit_at};
  use tempfile::TempDir;

  use super::*;

  /// `main` at t=4000, `feature-x` at t=3000, `bugfix-9` at t=2000, with
  /// `main` checked out.
  fn repo_with_three_branches() -> GitRepoTestGuard {
    let guard = GitRepoTestGuard::new();
    let repo = &guard.repo;

    create_commit_at(repo, "base.txt", "base\n", "initial commit", 1_000).unwrap();

    create_branch(repo, "bugfix-9", None).unwrap();
    checkout_branch(repo, "bugfix-9").unwrap();
    create_commit_at(repo, "bugfix.txt", "fix\n", "fix the bug", 2_000).unwrap();

    checkout_branch(repo, "main").unwrap();
    create_branch(repo, "feature-x", None).unwrap();
    checkout_branch(repo, "feature-x").unwrap();
    create_commit_at(repo, "feature.txt", "feature\n", "add the feature", 3_000).unwrap();

    checkout_branch(repo, "main").unwrap();
    create_commit_at(repo, "main.txt", "main\n", "main work", 4_000).unwrap();

    guard
  }

  #[tokio::test]
  async fn current_branch_reports_checked_out_branch() {
    let guard = repo_with_three_branches();

    let branch = current_branch(guard.path()).await.unwrap();

    assert_eq!(branch, Some(BranchName::from("main")));
  }

  #[tokio::test]
  async fn tag_named_like_current_branch_does_not_leak_it_into_candidates() {
    let guard = GitRepoTestGuard::new();
    let repo = &guard.repo;
    create_commit_at(repo, "base.txt", "base\n", "initial commit", 1_000).unwrap();
    create_branch(repo, "other", None).unwrap();
    {
      let head = repo.head().unwrap().peel_to_commit().unwrap();
      repo.tag_lightweight("main", head.as_object(), false).unwrap();
    }

    let current = current_branch(guard.path()).await.unwrap();
    let branches = candidate_branches(guard.path()).await.unwrap();

    assert_eq!(current, Some(BranchName::from("main")));
    assert_eq!(branches, vec![BranchName::from("other")]);
  }

  #[tokio::test]
  async fn detached_head_offers_every_branch() {
    let guard = repo_with_three_branches();
    {
      let head = guard.repo.head().unwrap().peel_to_commit().unwrap();
      guard.repo.set_head_detached(head.id()).unwrap();
    }

    assert_eq!(current_branch(guard.path()).await.unwrap(), None);

    let branches = candidate_branches(guard.path()).await.unwrap();
    assert_eq!(
      branches,
      vec![
        BranchName::from("main"),
        BranchName::from("feature-x"),
        BranchName::from("bugfix-9")
      ]
    );
  }

  #[tokio::test]
  async fn current_branch_outside_repository_fails() {
    let dir = TempDir::new().unwrap();

    let err = current_branch(dir.path()).await.unwrap_err();

    assert!(matches!(err, GrecentError::NotARepository));
  }

  #[tokio::test]
  async fn listing_is_sorted_by_commit_date() {
    let guard = repo_with_three_branches();

    let listing = branches_by_recency(guard.path()).await.unwrap();
    let lines: Vec<&str> = listing.lines().collect();

    assert_eq!(lines, vec!["refs/heads/main", "refs/heads/feature-x", "refs/heads/bugfix-9"]);
  }

  #[tokio::test]
  async fn listing_outside_repository_is_empty() {
    let dir = TempDir::new().unwrap();

    assert_eq!(branches_by_recency(dir.path()).await.unwrap(), "");
  }

  #[tokio::test]
  async fn candidates_exclude_current_branch() {
    let guard = repo_with_three_branches();

    let branches = candidate_branches(guard.path()).await.unwrap();

    assert_eq!(branches, vec![BranchName::from("feature-x"), BranchName::from("bugfix-9")]);
  }

  #[tokio::test]
  async fn single_branch_repository_is_reported() {
    let guard = GitRepoTestGuard::new();
    create_commit_at(&guard.repo, "base.txt", "base\n", "initial commit", 1_000).unwrap();

    let err = candidate_branches(guard.path()).await.unwrap_err();

    assert!(matches!(err, GrecentError::SingleBranch));
  }

  #[tokio::test]
  async fn candidates_outside_repository_report_missing_repository() {
    let dir = TempDir::new().unwrap();

    let err = candidate_branches(dir.path()).await.unwrap_err();

    assert!(matches!(err, GrecentError::NotARepository));
  }
}
