//! # Grecent Core Library
//!
//! Building blocks for the `grecent` branch switcher: querying a repository
//! for its branches by recency, turning the raw listing into candidates,
//! fuzzy filtering those candidates and checking out the chosen one.

pub mod consts;
pub mod error;
pub mod fuzzy;
pub mod git;
pub mod output;
pub mod prompts;

pub use error::{GrecentError, Result};
pub use fuzzy::{BranchFilter, filter_branches};
pub use git::{BranchName, build_branch_list, candidate_branches, parse_ref_line, switch_branch};
pub use output::{ColorMode, print_branch, print_error, print_failure};
pub use prompts::{grecent_theme, page_size};
