//! Commit graph traversal and three-way merge
//!
//! - `split_point`: ancestor closure and split point selection
//! - `resolution`: the per-path merge table over split, current and other trees
//! - `conflict`: rendering of conflicted working files

pub mod conflict;
pub mod resolution;
pub mod split_point;
