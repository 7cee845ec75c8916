use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the color conversions in [`crate::color`].
///
/// Both variants point at bad upstream data (a broken extractor or a
/// hand-edited palette file) and are never clamped or silently repaired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("malformed hex color '{input}': expected exactly 6 hex digits")]
    MalformedInput { input: String },

    #[error("{channel} channel value {value} is outside 0..=255")]
    Domain { channel: &'static str, value: i64 },
}

/// Errors raised while building a palette pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error(
        "light and dark palettes must define the same roles \
         (only in light: [{}], only in dark: [{}])",
        .only_light.join(", "),
        .only_dark.join(", ")
    )]
    MismatchedRoles {
        only_light: Vec<String>,
        only_dark: Vec<String>,
    },
}

/// Errors raised while loading a template registry.
///
/// [`RegistryError::ConfigNotFound`] and [`RegistryError::MalformedConfig`]
/// are fatal for a run. [`RegistryError::InvalidEntry`] only ever describes a
/// single skipped section; it is collected in
/// [`crate::registry::TemplateRegistry::rejected`] and never returned from
/// `load`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("template registry '{}' does not exist or cannot be opened", .path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("template registry '{}' could not be parsed: {reason}", .path.display())]
    MalformedConfig { path: PathBuf, reason: String },

    #[error("template section [{section}] is invalid: {reason}")]
    InvalidEntry { section: String, reason: String },
}

/// Errors that stop a concurrent render before it starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error(
        "templates [{}] all write to '{}'; concurrent rendering needs distinct output paths",
        .entries.join(", "),
        .path.display()
    )]
    SharedOutput { path: PathBuf, entries: Vec<String> },
}
