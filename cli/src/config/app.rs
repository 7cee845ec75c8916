use std::time::Duration;

use serde::Deserialize;

use super::limits::{MAX_ENTRY_TIMEOUT_MS, MIN_ENTRY_TIMEOUT_MS};
use super::validation::ConfigValidationError;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    render: RenderConfig,
    #[serde(default)]
    extractor: ExtractorConfig,
    #[serde(default)]
    reload: ReloadConfig,
    #[serde(default)]
    wallpaper: WallpaperConfig,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        let level = self.logging.level();
        if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            errors.push(ConfigValidationError::LogLevel {
                configured: level.to_string(),
            });
        }

        let timeout = self.render.entry_timeout_ms();
        if !(MIN_ENTRY_TIMEOUT_MS..=MAX_ENTRY_TIMEOUT_MS).contains(&timeout) {
            errors.push(ConfigValidationError::EntryTimeout {
                configured: timeout,
                min_limit: MIN_ENTRY_TIMEOUT_MS,
                max_limit: MAX_ENTRY_TIMEOUT_MS,
            });
        }

        if let Some(command) = self.extractor.command() {
            if command.trim().is_empty() {
                errors.push(ConfigValidationError::EmptyExtractorCommand);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    pub fn extractor(&self) -> &ExtractorConfig {
        &self.extractor
    }

    pub fn reload(&self) -> &ReloadConfig {
        &self.reload
    }

    pub fn wallpaper(&self) -> &WallpaperConfig {
        &self.wallpaper
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    parallel: Option<bool>,
    entry_timeout_ms: Option<u64>,
}

impl RenderConfig {
    pub fn parallel(&self) -> bool {
        self.parallel.unwrap_or(false)
    }

    pub fn entry_timeout_ms(&self) -> u64 {
        self.entry_timeout_ms
            .unwrap_or(engine::render::concurrent::DEFAULT_ENTRY_TIMEOUT.as_millis() as u64)
    }

    pub fn entry_timeout(&self) -> Duration {
        Duration::from_millis(self.entry_timeout_ms())
    }
}

/// External program that turns an image into a palette pair.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractorConfig {
    command: Option<String>,
    #[serde(default)]
    args: Vec<String>,
}

impl ExtractorConfig {
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Which running applications get poked after the templates are written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReloadConfig {
    pub enabled: bool,
    pub waybar: bool,
    pub kitty: bool,
    pub dunst: bool,
    pub gtk_theme: bool,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            waybar: true,
            kitty: true,
            dunst: false,
            gtk_theme: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallpaperTool {
    #[default]
    Swaybg,
    Swww,
    Feh,
    #[serde(rename = "none")]
    Off,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WallpaperConfig {
    pub enabled: bool,
    pub tool: WallpaperTool,
    pub args: Vec<String>,
}

impl Default for WallpaperConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tool: WallpaperTool::default(),
            args: Vec::new(),
        }
    }
}
