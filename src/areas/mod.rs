//! Core repository components
//!
//! - `database`: Content-addressed store for blobs and commits
//! - `index`: Staging area holding the tree of the next commit
//! - `refs`: Branch references and HEAD
//! - `repository`: Handle tying the areas together
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
