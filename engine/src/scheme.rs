//! Palette pairs and the scheme selected from them.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::{HexColor, PackedColor, RgbColor};
use crate::errors::PaletteError;

/// Role name → packed color for one mode.
pub type Palette = BTreeMap<String, PackedColor>;

/// Role name → hex color, as handed to the renderer.
pub type HexScheme = BTreeMap<String, HexColor>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Light,
    #[default]
    Dark,
}

impl Mode {
    pub fn from_lightmode(lightmode: bool) -> Self {
        if lightmode { Mode::Light } else { Mode::Dark }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The light and dark palettes derived from one image.
///
/// Both palettes always carry the same role names; construction and
/// deserialization both enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPalettePair")]
pub struct PalettePair {
    light: Palette,
    dark: Palette,
}

#[derive(Deserialize)]
struct RawPalettePair {
    light: Palette,
    dark: Palette,
}

impl TryFrom<RawPalettePair> for PalettePair {
    type Error = PaletteError;

    fn try_from(raw: RawPalettePair) -> Result<Self, Self::Error> {
        PalettePair::new(raw.light, raw.dark)
    }
}

impl PalettePair {
    pub fn new(light: Palette, dark: Palette) -> Result<Self, PaletteError> {
        let light_roles: BTreeSet<&String> = light.keys().collect();
        let dark_roles: BTreeSet<&String> = dark.keys().collect();

        if light_roles != dark_roles {
            return Err(PaletteError::MismatchedRoles {
                only_light: light_roles
                    .difference(&dark_roles)
                    .map(|role| role.to_string())
                    .collect(),
                only_dark: dark_roles
                    .difference(&light_roles)
                    .map(|role| role.to_string())
                    .collect(),
            });
        }

        Ok(Self { light, dark })
    }

    pub fn light(&self) -> &Palette {
        &self.light
    }

    pub fn dark(&self) -> &Palette {
        &self.dark
    }

    pub fn get(&self, mode: Mode) -> &Palette {
        match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        }
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.light.keys().map(String::as_str)
    }
}

/// Hex and rgb forms of one role, computed together for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColor {
    pub hex: HexColor,
    pub rgb: RgbColor,
}

impl From<&HexColor> for ResolvedColor {
    fn from(hex: &HexColor) -> Self {
        Self {
            hex: hex.clone(),
            rgb: hex.to_rgb(),
        }
    }
}

/// The palette chosen for the current run.
///
/// The mode is fixed at construction and the stored colors are never
/// rewritten; every view is derived fresh from the packed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheme {
    mode: Mode,
    colors: Palette,
}

impl Scheme {
    /// Copy the palette for `mode` out of `pair`. The other palette is not read.
    pub fn select(pair: &PalettePair, mode: Mode) -> Self {
        Self {
            mode,
            colors: pair.get(mode).clone(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn palette(&self) -> &Palette {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Role → hex color. Calling this repeatedly yields the same map.
    pub fn to_hex(&self) -> HexScheme {
        self.colors
            .iter()
            .map(|(role, color)| (role.clone(), color.to_hex()))
            .collect()
    }

    /// Hex and rgb forms of one role, as the renderer substitutes them.
    pub fn resolve(&self, role: &str) -> Option<ResolvedColor> {
        self.colors.get(role).map(|color| ResolvedColor {
            hex: color.to_hex(),
            rgb: color.to_rgb(),
        })
    }
}
