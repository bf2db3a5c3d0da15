//! External process collaborators: host restart and git

mod git;
mod restart;

pub use git::{commit_message, GitCommitter};
pub use restart::{ProcessRestarter, DEFAULT_RESTART_TIMEOUT};
