use std::path::{Path, PathBuf};

const APP_DIR: &str = "courtside";

fn config_root() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR)
}

/// Returns the platform-specific path for the config file.
///
/// # Notes
/// - Uses platform-specific config directory (e.g., ~/.config on Linux)
/// - Falls back to current directory if config directory is unavailable
pub fn get_config_path() -> String {
    config_root()
        .join("config.toml")
        .to_string_lossy()
        .to_string()
}

/// Returns the platform-specific path for the log directory.
pub fn get_log_dir_path() -> String {
    config_root().join("logs").to_string_lossy().to_string()
}

/// Directory for the writable local snapshot store.
///
/// Snapshots are re-downloadable, so they live under the cache directory
/// (e.g., ~/.cache on Linux) rather than next to the config.
pub fn get_snapshot_dir_path() -> String {
    dirs::cache_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR)
        .join("snapshots")
        .to_string_lossy()
        .to_string()
}

/// File holding user preferences such as favorite players
pub fn get_storage_path() -> String {
    config_root()
        .join(crate::constants::files::FAVORITES)
        .to_string_lossy()
        .to_string()
}
