//! Commit history traversal for `log`
//!
//! - `rev_list`: first-parent walk from a revision back to the initial commit

pub mod rev_list;
