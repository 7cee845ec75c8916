use std::path::PathBuf;

use engine::{PaletteError, RegistryError};
use thiserror::Error;

/// Application-wide error type for the `tincture` binary.
///
/// Every variant here is fatal for the run: `main` prints it and exits with a
/// non-zero status. Problems with individual templates are not errors at this
/// level; they end up in the render report and are only logged.
///
/// # Error Categories
///
/// ## Input Errors
/// - [`AppError::InvalidArgument`] - a command-line value failed validation
/// - [`AppError::NotFound`] - a file named on the command line is missing
///
/// ## Configuration Errors
/// - [`AppError::Config`] - `settings.toml` or its environment overrides are unusable
/// - [`AppError::Registry`] - the template registry could not be loaded at all
///
/// ## Collaborator Errors
/// - [`AppError::Palette`] - no palette pair could be obtained for the wallpaper
/// - [`AppError::Desktop`] - a desktop helper (wallpaper setter) failed
/// - [`AppError::Io`] - anything else touching the filesystem
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{what} '{}' does not exist", .path.display())]
    NotFound { what: &'static str, path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Palette error: {0}")]
    Palette(String),

    #[error("Desktop integration error: {0}")]
    Desktop(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PaletteError> for AppError {
    fn from(error: PaletteError) -> Self {
        AppError::Palette(error.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(error: config::ConfigError) -> Self {
        AppError::Config(error.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_is_transparent() {
        let error: AppError = RegistryError::ConfigNotFound {
            path: PathBuf::from("/nope/config.ini"),
        }
        .into();

        assert_eq!(
            error.to_string(),
            "template registry '/nope/config.ini' does not exist or cannot be opened"
        );
    }

    #[test]
    fn test_not_found_message() {
        let error = AppError::NotFound {
            what: "Wallpaper",
            path: PathBuf::from("/tmp/missing.png"),
        };
        assert_eq!(error.to_string(), "Wallpaper '/tmp/missing.png' does not exist");
    }

    #[test]
    fn test_palette_error_conversion() {
        let error: AppError = PaletteError::MismatchedRoles {
            only_light: vec!["a".into()],
            only_dark: vec![],
        }
        .into();
        assert!(matches!(error, AppError::Palette(msg) if msg.contains("only in light: [a]")));
    }
}
