//! Core repository components
//!
//! This module contains the fundamental building blocks of a repository:
//!
//! - `database`: Object database storing commit records by content hash
//! - `index`: Staging area tracking the paths to include in the next commit
//! - `refs`: Branch tips and HEAD
//! - `repository`: The per-operation handle tying the areas together
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
