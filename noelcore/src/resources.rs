//! Locating bundled card assets.
//!
//! The shipped card carries its presentation document, music track and
//! reference key next to the executable. `NOEL_RESOURCES` overrides the
//! lookup directory, which also keeps development runs working from a
//! checkout.

use std::path::PathBuf;

/// Directory the bundled assets are resolved against.
/// Order: `NOEL_RESOURCES` env var, the executable's directory, then `.`.
pub fn resource_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("NOEL_RESOURCES") {
        return PathBuf::from(dir);
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Resolve a bundled asset by its relative path.
pub fn resource_path(relative: &str) -> PathBuf {
    resource_dir().join(relative)
}
