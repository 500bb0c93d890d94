//! Persistent settings document.

use std::env;
use std::path::{Path, PathBuf};

use plum_core::store::{read_json, write_json_atomic};
use plum_core::Settings;

use crate::error::CliError;

const SETTINGS_FILE_NAME: &str = "settings.json";

pub fn resolve_settings_path(cli_settings_path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    cli_settings_path
        .or_else(|| env::var_os("PLUM_SETTINGS_PATH").map(PathBuf::from))
        .or_else(default_settings_path)
        .ok_or_else(|| CliError::Config("Failed to resolve settings directory".to_string()))
}

pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("plum").join(SETTINGS_FILE_NAME))
}

pub fn load_settings(path: &Path) -> Result<Settings, CliError> {
    Ok(read_json::<Settings>(path)?.unwrap_or_default())
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), CliError> {
    write_json_atomic(path, settings)?;
    Ok(())
}

/// Set `key` to `value` in the document at `path`
pub fn update_setting(path: &Path, key: &str, value: &str) -> Result<Settings, CliError> {
    let mut settings = load_settings(path)?;
    if !settings.set(key, value) {
        return Err(CliError::UnknownSetting(key.to_string()));
    }
    save_settings(path, &settings)?;
    Ok(settings)
}
