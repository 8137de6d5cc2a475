//! Porcelain commands
//!
//! - `init`: Create a repository with its initial commit
//! - `add`: Stage files for commit
//! - `commit`: Record the index as a new commit
//! - `rm`: Unstage or untrack files
//! - `log`: Show first-parent history, every commit, or commits by message
//! - `status`: Show branches, staged, removed, modified and untracked files
//! - `checkout`: Restore files or switch branches
//! - `branch`: Create, delete or list branches
//! - `reset`: Move the current branch to any commit
//! - `merge`: Merge another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
