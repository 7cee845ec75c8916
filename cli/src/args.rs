//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use engine::Mode;
use engine::registry::expand_home;

use crate::config::setup;
use crate::error::{AppError, AppResult};
use crate::validation::{FilePathValidator, Validator};

#[derive(Debug, Clone, Parser)]
#[command(name = "tincture", version)]
#[command(about = "Generate a Material color scheme from a wallpaper and render it into config templates", long_about = None)]
pub struct Cli {
    /// The wallpaper used to generate the color scheme.
    pub wallpaper: PathBuf,

    /// Use the light variant of the scheme.
    #[arg(short, long)]
    pub lightmode: bool,

    /// Template registry (INI or TOML). Defaults to ~/.config/tincture/config.ini.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read the palette pair from a JSON or TOML file instead of the extractor.
    #[arg(long, value_name = "FILE")]
    pub palette: Option<PathBuf>,

    /// Settings file. Defaults to ~/.config/tincture/settings.toml.
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Render templates without writing outputs, reloading apps or setting the wallpaper.
    #[arg(long)]
    pub dry_run: bool,

    /// Log every color of the selected scheme.
    #[arg(long)]
    pub show_colors: bool,

    /// Print the selected scheme as JSON on stdout.
    #[arg(long)]
    pub json: bool,

    /// Do not signal running applications after rendering.
    #[arg(long)]
    pub no_reload: bool,

    /// Do not set the wallpaper after rendering.
    #[arg(long)]
    pub no_wallpaper: bool,

    /// Log debug output.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments after validation, with every path expanded.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub wallpaper: PathBuf,
    pub registry: PathBuf,
    pub palette: Option<PathBuf>,
    pub mode: Mode,
    pub cli: Cli,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        Mode::from_lightmode(self.lightmode)
    }

    /// Check the wallpaper, registry and palette paths.
    ///
    /// The wallpaper is validated before the registry so the first problem a
    /// user sees is always about the image.
    pub fn validate(self) -> AppResult<Invocation> {
        let wallpaper = expand_home(&self.wallpaper);
        FilePathValidator::wallpaper().validate(&wallpaper)?;

        let registry = match &self.config {
            Some(path) => expand_home(path),
            None => setup::get_registry_file_path().map_err(|e| AppError::Config(e.to_string()))?,
        };
        FilePathValidator::registry().validate(&registry)?;

        let palette = match &self.palette {
            Some(path) => {
                let path = expand_home(path);
                FilePathValidator::palette().validate(&path)?;
                Some(path)
            }
            None => None,
        };

        Ok(Invocation {
            wallpaper,
            registry,
            palette,
            mode: self.mode(),
            cli: self,
        })
    }
}
