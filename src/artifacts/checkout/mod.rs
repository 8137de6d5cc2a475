//! Snapshot materialization
//!
//! Moving the working tree and index from one commit's tree to another:
//! - Planning the file system changes between the two trees
//! - Refusing to overwrite untracked files
//! - Writing the target blobs and replacing the index
//!
//! Every check runs before the first file is touched.

pub mod migration;
