//! Command implementations
//!
//! Every user-facing operation is an `impl Repository` block in its own
//! file under `porcelain`. Commands validate all of their preconditions
//! before the first write, so a failing command leaves the repository as it
//! found it.

pub mod porcelain;
