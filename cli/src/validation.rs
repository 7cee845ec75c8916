use std::path::Path;

use crate::error::AppError;

/// Core validation trait shared by the argument validators.
///
/// # Type Parameters
///
/// * `T` - The type of data being validated (can be unsized like `Path`)
pub trait Validator<T: ?Sized> {
    type Error;

    /// Validate the input and return Ok(()) if valid, or Err with validation error
    fn validate(&self, input: &T) -> Result<(), Self::Error>;
}

/// Validation errors for files named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathValidationError {
    MissingExtension { what: &'static str, path: String },
    InvalidFileExtension {
        path: String,
        expected: Vec<&'static str>,
        actual: String,
    },
    NotAFile { what: &'static str, path: String },
}

impl PathValidationError {
    pub fn user_message(&self) -> String {
        match self {
            PathValidationError::MissingExtension { what, path } => {
                format!("Invalid {what} file path '{path}': the file has no extension.")
            }
            PathValidationError::InvalidFileExtension {
                path,
                expected,
                actual,
            } => {
                format!(
                    "Invalid file extension for '{path}'. Expected one of [{}], got '{actual}'.",
                    expected.join(", ")
                )
            }
            PathValidationError::NotAFile { what, path } => {
                format!("The {what} file '{path}' doesn't exist.")
            }
        }
    }
}

impl From<PathValidationError> for AppError {
    fn from(error: PathValidationError) -> Self {
        match error {
            PathValidationError::NotAFile { what, path } => AppError::NotFound {
                what,
                path: path.into(),
            },
            other => AppError::InvalidArgument(other.user_message()),
        }
    }
}

/// Checks that a path has one of a fixed set of extensions and is an existing file.
#[derive(Debug, Clone)]
pub struct FilePathValidator {
    what: &'static str,
    extensions: &'static [&'static str],
}

pub const WALLPAPER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
pub const REGISTRY_EXTENSIONS: &[&str] = &["ini", "toml"];
pub const PALETTE_EXTENSIONS: &[&str] = &["json", "toml"];

impl FilePathValidator {
    pub const fn new(what: &'static str, extensions: &'static [&'static str]) -> Self {
        Self { what, extensions }
    }

    pub const fn wallpaper() -> Self {
        Self::new("wallpaper", WALLPAPER_EXTENSIONS)
    }

    pub const fn registry() -> Self {
        Self::new("config", REGISTRY_EXTENSIONS)
    }

    pub const fn palette() -> Self {
        Self::new("palette", PALETTE_EXTENSIONS)
    }
}

impl Validator<Path> for FilePathValidator {
    type Error = PathValidationError;

    fn validate(&self, input: &Path) -> Result<(), Self::Error> {
        let display = input.display().to_string();

        let Some(extension) = input.extension().and_then(|ext| ext.to_str()) else {
            return Err(PathValidationError::MissingExtension {
                what: self.what,
                path: display,
            });
        };

        if !self
            .extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
        {
            return Err(PathValidationError::InvalidFileExtension {
                path: display,
                expected: self.extensions.to_vec(),
                actual: extension.to_string(),
            });
        }

        if !input.is_file() {
            return Err(PathValidationError::NotAFile {
                what: self.what,
                path: display,
            });
        }

        Ok(())
    }
}
