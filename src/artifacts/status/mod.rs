//! Working tree status inspection
//!
//! Compares the head commit's tree, the index and the working directory.
//!
//! - `file_change`: Change categories and their rendering
//! - `status_info`: Collection of the changes into report sections

pub mod file_change;
pub mod status_info;
