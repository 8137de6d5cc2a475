//! Value types and algorithms over the repository areas
//!
//! - `branch`: Branch names and revision parsing
//! - `checkout`: Tree-to-tree migrations of the working directory and index
//! - `core`: Shared utilities (pager wrapper)
//! - `index`: Binary format of the staging index
//! - `log`: Commit history traversal
//! - `merge`: Split point search and three-way merge resolution
//! - `objects`: Blob and commit objects and their identifiers
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
