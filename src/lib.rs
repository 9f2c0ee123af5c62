//! A minimal local version-control engine.
//!
//! Files are snapshotted into content-addressed commits, staged through an index and
//! tracked by named branches. The crate is organised the way a git implementation usually
//! is:
//!
//! - `areas`: the persistent parts of a repository (object database, index, refs, workspace)
//! - `artifacts`: value types and algorithms operating on those areas
//! - `commands`: user-facing operations, each implemented on `Repository`
//! - `errors`: typed failure kinds

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

pub use areas::repository::Repository;
pub use errors::VcsError;
