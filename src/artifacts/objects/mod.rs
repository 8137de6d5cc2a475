//! Object types and operations
//!
//! Everything stored in the object database is an object identified by the
//! SHA-1 hash of its serialized form. There are two kinds:
//!
//! - **Blob**: file content (raw bytes)
//! - **Commit**: snapshot node with parents, timestamp, message and a flat
//!   path to blob tree
//!
//! All objects serialize to `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Shortest prefix accepted when resolving abbreviated object IDs
pub const MIN_PREFIX_LENGTH: usize = 4;
