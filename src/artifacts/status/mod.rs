//! Working tree status inspection
//!
//! This module detects divergence between the working directory, the staging index and
//! the tip commit of the current branch.
//!
//! ## Components
//!
//! - `file_change`: the kinds of divergence and how they are reported
//! - `inspector`: the comparison itself

pub mod file_change;
pub mod inspector;
