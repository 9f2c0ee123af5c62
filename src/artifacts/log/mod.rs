//! Commit history traversal
//!
//! - `rev_list`: lazy tip-to-root walk over a single parent chain
//!
//! History is strictly linear: every commit has at most one parent, so the walk is a
//! simple linked-list traversal that terminates at the root commit.

pub mod rev_list;
