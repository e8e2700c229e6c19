//! # Git Integration
//!
//! Everything grecent asks of git: the read-only queries that discover the
//! current branch and the recency-ordered branch listing, the parser that turns
//! that listing into candidates, and the checkout that performs the switch.

mod command;
pub mod query;
pub mod refs;
pub mod switch;

pub use query::{branches_by_recency, candidate_branches, current_branch};
pub use refs::{BranchName, build_branch_list, parse_ref_line};
pub use switch::switch_branch;
