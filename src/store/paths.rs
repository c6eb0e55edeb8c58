// Path utilities for persisted documents.
// Resolves the platform config and cache locations for the settings file and
// the notified-items cache.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Get the base config directory (~/.config/wishwatch on Linux).
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "wishwatch").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the base cache directory (~/.cache/wishwatch on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "wishwatch").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the persisted settings document.
pub fn settings_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("settings.json"))
}

/// Path to the cache of already-notified items.
pub fn cached_data_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("cached_data.json"))
}
