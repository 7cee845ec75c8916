//! Application settings.
//!
//! Settings come from an optional `settings.toml` (by default in
//! `~/.config/tincture/`) followed by environment overrides such as
//! `TINCTURE__RENDER__PARALLEL=true`. A `.env` file in the working directory
//! is honored. The template registry is a separate document, loaded by the
//! engine.

use std::path::Path;

use config::{Config, Environment, File, FileFormat};

use crate::error::{AppError, AppResult};

pub mod app;
pub mod limits;
pub mod setup;
pub mod validation;

pub use app::{
    AppConfig, ExtractorConfig, LoggingConfig, ReloadConfig, RenderConfig, WallpaperConfig,
    WallpaperTool,
};
pub use validation::ConfigValidationError;

pub const ENV_PREFIX: &str = "TINCTURE";

/// Load settings from `path` (or the default location) plus the environment.
///
/// An explicitly given file must exist; the default one is optional.
pub fn load_config(path: Option<&Path>) -> AppResult<AppConfig> {
    dotenv::dotenv().ok();

    let (file, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (
            setup::get_settings_file_path().map_err(|e| AppError::Config(e.to_string()))?,
            false,
        ),
    };

    if required && !file.is_file() {
        return Err(AppError::NotFound {
            what: "Settings file",
            path: file,
        });
    }

    let env_source = Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("extractor.args")
        .with_list_parse_key("wallpaper.args");

    let config = Config::builder()
        .add_source(File::new(&file.to_string_lossy(), FileFormat::Toml).required(required))
        .add_source(env_source)
        .build()
        .map_err(|e| {
            AppError::Config(format!(
                "Configuration loading failed: {e}. Please check {} and TINCTURE__* environment variables.",
                file.display()
            ))
        })?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| AppError::Config(format!("Failed to deserialize config: {e}")))?;

    if let Err(validation_errors) = app_config.validate() {
        let error_messages: Vec<String> =
            validation_errors.iter().map(|e| e.user_message()).collect();
        return Err(AppError::Config(format!(
            "Configuration validation failed:\n{}",
            error_messages.join("\n\n")
        )));
    }

    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::assert_ok;

    #[test]
    fn test_load_explicit_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            "[logging]\nlevel = \"debug\"\n\n[render]\nentry_timeout_ms = 250\n",
        )
        .unwrap();

        let config = assert_ok!(load_config(Some(&path)));
        assert_eq!(config.logging().level(), "debug");
        assert_eq!(config.render().entry_timeout_ms(), 250);
    }

    #[test]
    fn test_missing_explicit_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(matches!(
            load_config(Some(&path)),
            Err(AppError::NotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[render]\nentry_timeout_ms = 9999999\n").unwrap();

        match load_config(Some(&path)) {
            Err(AppError::Config(message)) => {
                assert!(message.contains("render.entry_timeout_ms"));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }
}
