//! twig: a small single-user version control engine
//!
//! The crate is organised the same way the on-disk repository is:
//!
//! - `areas`: the persistent parts of a repository (object database, refs,
//!   staging index, working tree) and the `Repository` handle tying them together
//! - `artifacts`: value types and algorithms over those areas (objects, branch
//!   names, commit graph traversal, three-way merge, checkout migrations, status)
//! - `commands`: one entry point per user-facing operation
//! - `errors`: the typed failures surfaced at the command boundary

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

/// Name of the metadata directory created at the root of the working tree
pub const METADATA_DIR: &str = ".twig";

/// Branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";
