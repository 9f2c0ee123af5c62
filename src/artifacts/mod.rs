//! Data structures and algorithms
//!
//! - `branch`: Branch name validation
//! - `core`: Shared path helpers
//! - `ignore`: Ignore rules consulted when staging
//! - `index`: Staging index file format
//! - `log`: Commit history traversal
//! - `objects`: Content hashing and the commit record
//! - `status`: Working tree divergence detection

pub mod branch;
pub mod core;
pub mod ignore;
pub mod index;
pub mod log;
pub mod objects;
pub mod status;
