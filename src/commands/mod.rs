//! Command implementations
//!
//! - `porcelain`: User-facing version control workflows (add, commit, log, etc.)

pub mod porcelain;
