//! Platform lookup for the directory holding persisted node key material.

use std::path::PathBuf;

/// Application-support directory on Apple-family targets, `None` when the
/// platform cannot resolve one.
#[cfg(target_vendor = "apple")]
pub fn app_support_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "posemesh").map(|dirs| dirs.data_dir().to_path_buf())
}

#[cfg(not(target_vendor = "apple"))]
pub fn app_support_dir() -> Option<PathBuf> {
    None
}
