//! Where the palette pair for a wallpaper comes from.
//!
//! Tincture does not quantize images itself. The pair is either read from a
//! file (`--palette`) or produced by an external extractor program configured
//! in `[extractor]`, which receives the wallpaper path as its last argument
//! and prints the pair as JSON on stdout.
//!
//! Both accept the same document shape:
//!
//! ```json
//! { "light": { "primary": "#6750a4", ... }, "dark": { "primary": 13684991, ... } }
//! ```
//!
//! or the same pair nested under a `schemes` key. Colors may be `#rrggbb`
//! strings or packed integers; unknown keys are ignored.

use std::path::{Path, PathBuf};
use std::process::Command;

use engine::PalettePair;
use engine::scheme::Palette;
use serde::Deserialize;

use crate::config::ExtractorConfig;
use crate::error::{AppError, AppResult};

pub trait PaletteSource {
    fn palette_for(&self, image: &Path) -> AppResult<PalettePair>;

    /// Short description used in log lines.
    fn describe(&self) -> String;
}

#[derive(Debug, Deserialize)]
struct PaletteDocument {
    schemes: Option<PaletteVariants>,
    light: Option<Palette>,
    dark: Option<Palette>,
}

#[derive(Debug, Deserialize)]
struct PaletteVariants {
    light: Palette,
    dark: Palette,
}

impl PaletteDocument {
    fn into_pair(self) -> AppResult<PalettePair> {
        let (light, dark) = match (self.schemes, self.light, self.dark) {
            (Some(schemes), _, _) => (schemes.light, schemes.dark),
            (None, Some(light), Some(dark)) => (light, dark),
            _ => {
                return Err(AppError::Palette(
                    "palette document needs both 'light' and 'dark' tables".to_string(),
                ));
            }
        };
        Ok(PalettePair::new(light, dark)?)
    }
}

/// Parse a palette document from JSON text.
pub fn parse_json(text: &str) -> AppResult<PalettePair> {
    serde_json::from_str::<PaletteDocument>(text)
        .map_err(|e| AppError::Palette(format!("invalid palette JSON: {e}")))?
        .into_pair()
}

/// Parse a palette document from TOML text.
pub fn parse_toml(text: &str) -> AppResult<PalettePair> {
    toml::from_str::<PaletteDocument>(text)
        .map_err(|e| AppError::Palette(format!("invalid palette TOML: {e}")))?
        .into_pair()
}

/// A palette pair stored on disk. The wallpaper is ignored.
#[derive(Debug, Clone)]
pub struct PaletteFile {
    path: PathBuf,
}

impl PaletteFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PaletteSource for PaletteFile {
    fn palette_for(&self, _image: &Path) -> AppResult<PalettePair> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            AppError::Palette(format!(
                "failed to read palette file '{}': {e}",
                self.path.display()
            ))
        })?;

        let is_toml = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            parse_toml(&text)
        } else {
            parse_json(&text)
        }
    }

    fn describe(&self) -> String {
        format!("palette file {}", self.path.display())
    }
}

/// An external program that prints the palette pair for an image.
#[derive(Debug, Clone)]
pub struct ExtractorCommand {
    command: String,
    args: Vec<String>,
}

impl ExtractorCommand {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

impl PaletteSource for ExtractorCommand {
    fn palette_for(&self, image: &Path) -> AppResult<PalettePair> {
        log::debug!(
            "Running extractor: {} {} {}",
            self.command,
            self.args.join(" "),
            image.display()
        );

        let output = Command::new(&self.command)
            .args(&self.args)
            .arg(image)
            .output()
            .map_err(|e| AppError::Palette(format!("failed to run '{}': {e}", self.command)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Palette(format!(
                "'{}' exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| {
            AppError::Palette(format!("'{}' printed non UTF-8 output", self.command))
        })?;
        parse_json(&stdout)
    }

    fn describe(&self) -> String {
        format!("extractor '{}'", self.command)
    }
}

/// Pick the palette source: an explicit file wins over the configured extractor.
pub fn select_source(
    palette_file: Option<&Path>,
    extractor: &ExtractorConfig,
) -> AppResult<Box<dyn PaletteSource>> {
    if let Some(path) = palette_file {
        return Ok(Box::new(PaletteFile::new(path)));
    }

    match extractor.command() {
        Some(command) => Ok(Box::new(ExtractorCommand::new(
            command,
            extractor.args().to_vec(),
        ))),
        None => Err(AppError::Palette(
            "no palette source available. Pass --palette FILE or set [extractor] command \
             in settings.toml"
                .to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok};
    use engine::PackedColor;

    const PAIR_JSON: &str = r##"{
        "light": { "primary": "#6750a4", "surface": 16777215 },
        "dark":  { "primary": "d0bcff", "surface": 1315860 }
    }"##;

    #[test]
    fn test_parse_json_accepts_strings_and_integers() {
        let pair = assert_ok!(parse_json(PAIR_JSON));
        assert_eq!(pair.light()["primary"], PackedColor::new(0x6750a4));
        assert_eq!(pair.light()["surface"], PackedColor::new(0xffffff));
        assert_eq!(pair.dark()["primary"], PackedColor::new(0xd0bcff));
    }

    #[test]
    fn test_parse_json_accepts_schemes_wrapper() {
        let wrapped = format!(r#"{{ "source": 4282557941, "schemes": {PAIR_JSON} }}"#);
        let pair = assert_ok!(parse_json(&wrapped));
        assert_eq!(pair.roles().collect::<Vec<_>>(), vec!["primary", "surface"]);
    }

    #[test]
    fn test_parse_toml() {
        let pair = assert_ok!(parse_toml(
            "[light]\nprimary = \"#000000\"\n\n[dark]\nprimary = 16777215\n"
        ));
        assert_eq!(pair.dark()["primary"], PackedColor::new(0xffffff));
    }

    #[test]
    fn test_mismatched_roles_rejected() {
        let err = assert_err!(parse_json(
            r#"{ "light": { "primary": 1 }, "dark": { "secondary": 2 } }"#
        ));
        assert!(matches!(err, AppError::Palette(msg) if msg.contains("only in light: [primary]")));
    }

    #[test]
    fn test_missing_variant_rejected() {
        assert!(matches!(
            parse_json(r#"{ "light": { "primary": 1 } }"#),
            Err(AppError::Palette(_))
        ));
    }

    #[test]
    fn test_palette_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("pair.json");
        std::fs::write(&json, PAIR_JSON).unwrap();

        let pair = assert_ok!(PaletteFile::new(&json).palette_for(Path::new("ignored.png")));
        assert_eq!(pair.light().len(), 2);
    }

    #[test]
    fn test_extractor_receives_image_path() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("pair.json");
        std::fs::write(&json, PAIR_JSON).unwrap();

        // `cat` prints whatever file it is handed as the "image".
        let extractor = ExtractorCommand::new("cat", Vec::new());
        let pair = assert_ok!(extractor.palette_for(&json));
        assert_eq!(pair.dark()["surface"], PackedColor::new(1315860));
    }

    #[test]
    fn test_extractor_failure_is_reported() {
        let extractor = ExtractorCommand::new("false", Vec::new());
        assert!(matches!(
            extractor.palette_for(Path::new("wall.png")),
            Err(AppError::Palette(_))
        ));

        let missing = ExtractorCommand::new("tincture-no-such-extractor", Vec::new());
        assert!(matches!(
            missing.palette_for(Path::new("wall.png")),
            Err(AppError::Palette(msg)) if msg.contains("failed to run")
        ));
    }

    #[test]
    fn test_select_source() {
        let none = ExtractorConfig::default();
        assert!(matches!(
            select_source(None, &none),
            Err(AppError::Palette(_))
        ));

        let file = assert_ok!(select_source(Some(Path::new("pair.json")), &none));
        assert!(file.describe().contains("pair.json"));

        let configured: ExtractorConfig = toml::from_str("command = \"extract\"").unwrap();
        let source = assert_ok!(select_source(None, &configured));
        assert_eq!(source.describe(), "extractor 'extract'");

        let both = assert_ok!(select_source(Some(Path::new("pair.json")), &configured));
        assert!(both.describe().starts_with("palette file"));
    }
}
