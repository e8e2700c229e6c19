//! Constants shared by the grecent crates.

/// Platform-specific Git executable name
#[cfg(windows)]
pub const GIT_EXECUTABLE: &str = "git.exe";

/// Platform-specific Git executable name
#[cfg(not(windows))]
pub const GIT_EXECUTABLE: &str = "git";

/// Prefix of every local branch reference.
pub const LOCAL_BRANCH_PREFIX: &str = "refs/heads/";

/// Upper bound on the number of rows a selection prompt shows at once.
pub const MAX_PAGE_SIZE: usize = 10;

/// Prompt shown above the branch list.
pub const SELECT_PROMPT: &str = "Choose branch:";
