//! Core utilities and shared types
//!
//! This module contains shared helpers used across the application.

use std::path::{Component, Path, PathBuf};

/// Render a repository-relative path with `/` separators
///
/// Persisted records (commits, index) always use this form so that they do not depend on
/// the platform the repository was written on.
pub fn path_to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

pub fn slash_to_path(path: &str) -> PathBuf {
    path.split('/').filter(|part| !part.is_empty()).collect()
}

/// Whether any component of a relative path starts with a dot
pub fn is_hidden(path: &Path) -> bool {
    path.components().any(|component| match component {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => false,
    })
}
