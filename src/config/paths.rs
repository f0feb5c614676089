//! Platform-specific configuration and data paths.

use crate::constants::{APP_NAME, USERS_FILE_NAME};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Get the configuration directory for the current platform.
///
/// - Linux: `~/.config/wildwatch/`
/// - macOS: `~/Library/Application Support/wildwatch/`
/// - Windows: `%APPDATA%\wildwatch\`
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get the default path to the credential store file.
pub fn default_users_file_path() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().join(USERS_FILE_NAME))
        .ok_or(Error::DataDirNotFound)
}
