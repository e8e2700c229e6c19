//! Test utilities shared across the grecent workspace
//!
//! The dead_code lint is disabled for this crate because not every test uses
//! every helper, and usage across dev-dependency boundaries is invisible to
//! the compiler.

#![allow(dead_code)]

pub mod git;

pub use git::GitRepoTestGuard;
