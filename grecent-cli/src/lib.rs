//! # Grecent CLI
//!
//! Command-line front end for grecent: parses flags, drives the branch
//! selection pipeline and maps its outcome to an exit code.

pub mod cli;
pub mod selector;

pub use cli::{Cli, handle_cli};
