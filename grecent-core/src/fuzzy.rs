//! # Fuzzy Branch Filtering
//!
//! Wraps [`nucleo::Nucleo`] so the selector can re-filter the candidate list on
//! every keystroke without waiting for the match pass to finish. Matching runs
//! on nucleo's worker pool; callers reparse the query with
//! [`BranchFilter::set_query`] and poll for results with
//! [`BranchFilter::tick`].
//!
//! Matching is case-insensitive and scores contiguous runs higher than
//! scattered subsequence hits. An empty query matches every candidate and
//! keeps the original (recency) order. The query is always one literal term:
//! nucleo's pattern operators (`!`, `^`, `'`, trailing `$`, whitespace) are
//! escaped, since `!wip` and `price$` are valid branch names.

use std::fmt;
use std::sync::Arc;

use nucleo::pattern::{CaseMatching, Normalization};
use nucleo::{Config, Nucleo};
use tracing::trace;

use crate::git::BranchName;

/// How long a single [`BranchFilter::tick`] may wait for the matcher, in
/// milliseconds.
const TICK_TIMEOUT_MS: u64 = 10;

/// Incremental fuzzy filter over a fixed set of branch names.
pub struct BranchFilter {
  matcher: Nucleo<BranchName>,
  query: String,
}

impl fmt::Debug for BranchFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("BranchFilter")
      .field("query", &self.query)
      .field("matched", &self.matched_count())
      .finish_non_exhaustive()
  }
}

impl BranchFilter {
  /// Create a filter over `candidates` with an empty query.
  pub fn new(candidates: &[BranchName]) -> Self {
    // Results are polled through `tick`, so the worker pool has nobody to wake.
    let matcher = Nucleo::new(Config::DEFAULT, Arc::new(|| {}), None, 1);

    let injector = matcher.injector();
    for branch in candidates {
      injector.push(branch.clone(), |branch, columns| {
        columns[0] = branch.as_str().into();
      });
    }

    Self {
      matcher,
      query: String::new(),
    }
  }

  /// The query currently applied to the candidates.
  pub fn query(&self) -> &str {
    &self.query
  }

  /// Replace the query. The new results become visible after subsequent
  /// calls to [`Self::tick`].
  pub fn set_query(&mut self, query: &str) {
    if query == self.query {
      return;
    }

    // Extending the query lets nucleo narrow the previous matches instead of
    // rescanning every candidate.
    let append = query.starts_with(self.query.as_str());
    let pattern = escape_pattern(query);
    self
      .matcher
      .pattern
      .reparse(0, &pattern, CaseMatching::Ignore, Normalization::Smart, append);
    trace!(query, append, "Reparsed fuzzy query");

    self.query = query.to_string();
  }

  /// Pick up whatever the worker pool has produced so far, waiting at most a
  /// few milliseconds. Returns `true` while a match pass is still running.
  pub fn tick(&mut self) -> bool {
    self.matcher.tick(TICK_TIMEOUT_MS).running
  }

  /// Block until the current query has been fully matched.
  pub fn settle(&mut self) {
    while self.tick() {}
  }

  /// Number of candidates matching the current query.
  pub fn matched_count(&self) -> usize {
    self.matcher.snapshot().matched_item_count() as usize
  }

  /// The matching candidates, best match first.
  pub fn matches(&self) -> Vec<BranchName> {
    self
      .matcher
      .snapshot()
      .matched_items(..)
      .map(|item| item.data.clone())
      .collect()
  }

  /// The match at `index` in ranked order, if any.
  pub fn get(&self, index: usize) -> Option<BranchName> {
    let index = u32::try_from(index).ok()?;
    let snapshot = self.matcher.snapshot();
    if index >= snapshot.matched_item_count() {
      return None;
    }

    snapshot.matched_items(index..=index).next().map(|item| item.data.clone())
  }
}

/// Escape nucleo's pattern syntax so `query` is matched as one literal fuzzy
/// term.
fn escape_pattern(query: &str) -> String {
  let mut escaped = String::with_capacity(query.len() + 4);

  if matches!(query.chars().next(), Some('!' | '^' | '\'')) {
    escaped.push('\\');
  }

  let last = query.char_indices().last().map(|(index, _)| index);
  for (index, c) in query.char_indices() {
    if c.is_whitespace() || (c == '$' && Some(index) == last) {
      escaped.push('\\');
    }
    escaped.push(c);
  }

  escaped
}

/// Filter `candidates` by `query` in one blocking call.
pub fn filter_branches(candidates: &[BranchName], query: &str) -> Vec<BranchName> {
  let mut filter = BranchFilter::new(candidates);
  filter.set_query(query);
  filter.settle();
  filter.matches()
}
