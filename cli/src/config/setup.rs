use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Failed to determine config directory: {0}")]
    ConfigDirError(String),
}

pub const APP_DIR_NAME: &str = "tincture";
pub const REGISTRY_FILE_NAME: &str = "config.ini";
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Get the standard configuration directory for the current platform
pub fn get_config_dir() -> Result<PathBuf, SetupError> {
    // Prefer ~/.config/tincture on Unix-like systems, fall back to platform defaults
    if cfg!(unix) {
        if let Some(mut home_path) = dirs::home_dir() {
            home_path.push(".config");
            home_path.push(APP_DIR_NAME);
            return Ok(home_path);
        }
    }

    dirs::config_dir()
        .map(|mut path| {
            path.push(APP_DIR_NAME);
            path
        })
        .ok_or_else(|| {
            SetupError::ConfigDirError("Unable to determine config directory".to_string())
        })
}

/// Default location of the template registry.
pub fn get_registry_file_path() -> Result<PathBuf, SetupError> {
    let mut config_dir = get_config_dir()?;
    config_dir.push(REGISTRY_FILE_NAME);
    Ok(config_dir)
}

/// Default location of the optional settings file.
pub fn get_settings_file_path() -> Result<PathBuf, SetupError> {
    let mut config_dir = get_config_dir()?;
    config_dir.push(SETTINGS_FILE_NAME);
    Ok(config_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_live_in_config_dir() {
        let dir = get_config_dir().unwrap();
        assert!(dir.ends_with(APP_DIR_NAME));
        assert_eq!(get_registry_file_path().unwrap(), dir.join("config.ini"));
        assert_eq!(get_settings_file_path().unwrap(), dir.join("settings.toml"));
    }
}
