//! Parsing of `git for-each-ref` output into branch names.
//!
//! Each listing line follows the grammar
//!
//! ```text
//! line := ws* [ <oid> ws <type> ws ] "refs/heads/" <name> ws*
//! ```
//!
//! The optional object columns are what `for-each-ref` prints without a
//! `--format`; grecent asks for `%(refname)` only, but both shapes parse.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::consts::LOCAL_BRANCH_PREFIX;

/// Name of a local branch, without the `refs/heads/` prefix.
///
/// Backed by an `Arc<str>` so candidate lists can be handed to the fuzzy
/// matcher and the selector without copying every name.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BranchName(Arc<str>);

impl BranchName {
  /// Construct a branch name from any string-like value.
  pub fn new(name: impl Into<Arc<str>>) -> Self {
    Self(name.into())
  }

  /// Borrow the underlying branch name as a `&str`.
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for BranchName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("BranchName").field(&self.as_str()).finish()
  }
}

impl fmt::Display for BranchName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl AsRef<str> for BranchName {
  fn as_ref(&self) -> &str {
    self.as_str()
  }
}

impl From<&str> for BranchName {
  fn from(value: &str) -> Self {
    Self::new(Arc::<str>::from(value))
  }
}

impl From<String> for BranchName {
  fn from(value: String) -> Self {
    Self::new(Arc::<str>::from(value))
  }
}

impl PartialEq<str> for BranchName {
  fn eq(&self, other: &str) -> bool {
    self.as_str() == other
  }
}

impl PartialEq<&str> for BranchName {
  fn eq(&self, other: &&str) -> bool {
    self.as_str() == *other
  }
}

/// Extract the short branch name from a single listing line.
///
/// Returns `None` for blank lines, references outside `refs/heads/` and
/// references with an empty name.
pub fn parse_ref_line(line: &str) -> Option<BranchName> {
  let refname = line.split_whitespace().last()?;
  let name = refname.strip_prefix(LOCAL_BRANCH_PREFIX)?;

  if name.is_empty() { None } else { Some(BranchName::from(name)) }
}

/// Build the candidate list from the current branch and the raw recency
/// listing.
///
/// Listing order is preserved, duplicates keep their first position and the
/// current branch (compared after trimming) is always excluded. A detached
/// HEAD (`None`) excludes nothing. Unparseable lines are skipped, so garbage
/// input yields an empty list.
pub fn build_branch_list(current: Option<&str>, raw_listing: &str) -> Vec<BranchName> {
  let current = current.map(str::trim);
  let mut seen = HashSet::new();

  raw_listing
    .lines()
    .filter_map(|line| {
      let parsed = parse_ref_line(line);
      if parsed.is_none() && !line.trim().is_empty() {
        trace!(line, "Skipping unrecognised ref line");
      }
      parsed
    })
    .filter(|branch| Some(branch.as_str()) != current)
    .filter(|branch| seen.insert(branch.clone()))
    .collect()
}

#[cfg(test)]
mod tests {
  use test_case::test_case;

  use super::*;

  #[test_case("refs/heads/main", "main" ; "plain ref")]
  #[test_case("refs/heads/feature/login", "feature/login" ; "nested name")]
  #[test_case("  refs/heads/bugfix-9 \r", "bugfix-9" ; "surrounding whitespace")]
  #[test_case("0a1b2c3d commit\trefs/heads/release/1.2", "release/1.2" ; "default for-each-ref format")]
  #[test_case("refs/heads/refs/heads/odd", "refs/heads/odd" ; "prefix only stripped once")]
  fn parses_local_branch_refs(line: &str, expected: &str) {
    assert_eq!(parse_ref_line(line), Some(BranchName::from(expected)));
  }

  #[test_case("" ; "empty line")]
  #[test_case("   \t" ; "whitespace only")]
  #[test_case("refs/heads/" ; "empty name")]
  #[test_case("refs/remotes/origin/main" ; "remote ref")]
  #[test_case("refs/tags/v1.0" ; "tag ref")]
  #[test_case("main" ; "bare name")]
  fn rejects_non_branch_lines(line: &str) {
    assert_eq!(parse_ref_line(line), None);
  }

  #[test]
  fn parsed_name_matches_the_name_the_line_was_built_from() {
    for name in ["main", "feature-x", "user/jdoe/PROJ-123_fix", "a.b.c", "v2"] {
      let line = format!("{LOCAL_BRANCH_PREFIX}{name}");
      assert_eq!(parse_ref_line(&line).as_ref().map(BranchName::as_str), Some(name));
    }
  }

  #[test]
  fn excludes_current_branch_and_keeps_recency_order() {
    let listing = "refs/heads/main\nrefs/heads/feature-x\nrefs/heads/bugfix-9\n";

    let branches = build_branch_list(Some("main"), listing);

    assert_eq!(branches, vec![BranchName::from("feature-x"), BranchName::from("bugfix-9")]);
  }

  #[test_case("main" ; "bare")]
  #[test_case("main\n" ; "trailing newline")]
  #[test_case("  main \r\n" ; "padded")]
  fn current_branch_whitespace_does_not_matter(current: &str) {
    let listing = "refs/heads/feature-x\nrefs/heads/main\nrefs/heads/bugfix-9\n";

    let branches = build_branch_list(Some(current), listing);

    assert!(!branches.iter().any(|branch| branch == "main"));
    assert_eq!(branches.len(), 2);
  }

  #[test]
  fn tolerates_trailing_blank_lines() {
    let listing = "refs/heads/main\nrefs/heads/feature-x\n\n   \n";

    assert_eq!(build_branch_list(Some("main"), listing), vec![BranchName::from("feature-x")]);
  }

  #[test]
  fn only_current_branch_yields_empty_list() {
    assert!(build_branch_list(Some("main"), "refs/heads/main\n").is_empty());
  }

  #[test]
  fn empty_or_malformed_listing_yields_empty_list() {
    assert!(build_branch_list(Some("main"), "").is_empty());
    assert!(build_branch_list(Some("main"), "fatal: something odd\nnot a ref\n").is_empty());
  }

  #[test]
  fn duplicate_refs_keep_their_first_position() {
    let listing = "refs/heads/a\nrefs/heads/b\nrefs/heads/a\nrefs/heads/c\n";

    let branches = build_branch_list(Some("main"), listing);

    assert_eq!(
      branches,
      vec![BranchName::from("a"), BranchName::from("b"), BranchName::from("c")]
    );
  }

  #[test]
  fn detached_head_excludes_nothing() {
    let listing = "refs/heads/main\nrefs/heads/feature-x\n";

    assert_eq!(build_branch_list(None, listing).len(), 2);
  }
}
