//! Default file locations.

use std::path::PathBuf;

const APP_DIR: &str = "coralert";

/// `<config_dir>/coralert`, falling back to the working directory.
pub fn config_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// `<config_dir>/coralert/config.ini`
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

/// `<cache_dir>/coralert/datasets`
pub fn default_store_directory() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("datasets")
}

/// `<cache_dir>/coralert/logs`
pub fn default_log_directory() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("logs")
}
