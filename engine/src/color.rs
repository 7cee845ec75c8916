//! Color value conversions.
//!
//! Three representations are used throughout tincture:
//!
//! - [`PackedColor`] - a 24-bit integer as emitted by palette extractors
//!   (`0xRRGGBB`, bits above 24 ignored)
//! - [`RgbColor`] - an `(r, g, b)` triple of 8-bit channels
//! - [`HexColor`] - six lowercase hex digits, displayed with a leading `#`
//!
//! All conversions are pure. [`PackedColor`] → [`RgbColor`] → [`HexColor`]
//! is total; parsing hex text or building an [`RgbColor`] from wider integers
//! can fail with a [`ColorError`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ColorError;

/// A color packed as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackedColor(u32);

impl PackedColor {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub fn to_rgb(self) -> RgbColor {
        dec_to_rgb(self.0)
    }

    pub fn to_hex(self) -> HexColor {
        rgb_to_hex(self.to_rgb())
    }
}

impl From<u32> for PackedColor {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<RgbColor> for PackedColor {
    fn from(rgb: RgbColor) -> Self {
        rgb.to_packed()
    }
}

/// Extractors emit plain integers, hand-written palettes usually use hex
/// strings. Both are accepted.
impl<'de> Deserialize<'de> for PackedColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(u64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Int(value) => {
                let value = u32::try_from(value).map_err(|_| {
                    serde::de::Error::custom(format!("color value {value} does not fit in 32 bits"))
                })?;
                Ok(Self(value))
            }
            Repr::Text(text) => HexColor::parse(&text)
                .map(|hex| hex.to_rgb().to_packed())
                .map_err(serde::de::Error::custom),
        }
    }
}

impl Serialize for PackedColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.0 & 0x00FF_FFFF)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from wider integers, rejecting anything outside `0..=255`.
    ///
    /// Out-of-range values are reported rather than clamped so that a broken
    /// extractor surfaces immediately.
    pub fn try_from_channels(r: i64, g: i64, b: i64) -> Result<Self, ColorError> {
        Ok(Self {
            r: channel("red", r)?,
            g: channel("green", g)?,
            b: channel("blue", b)?,
        })
    }

    pub const fn to_packed(self) -> PackedColor {
        PackedColor(((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32)
    }

    /// CSS functional notation, e.g. `rgb(255, 255, 255)`.
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl From<RgbColor> for (u8, u8, u8) {
    fn from(rgb: RgbColor) -> Self {
        (rgb.r, rgb.g, rgb.b)
    }
}

fn channel(name: &'static str, value: i64) -> Result<u8, ColorError> {
    u8::try_from(value).map_err(|_| ColorError::Domain {
        channel: name,
        value,
    })
}

/// Six lowercase hex digits. Stored without `#`, displayed with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexColor(String);

impl HexColor {
    /// Parse `rrggbb` or `#rrggbb`, either case. The stored form is lowercase.
    pub fn parse(text: &str) -> Result<Self, ColorError> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        Ok(rgb_to_hex(hex_to_rgb(digits)?))
    }

    /// The bare digits, without `#`.
    pub fn digits(&self) -> &str {
        &self.0
    }

    pub fn to_rgb(&self) -> RgbColor {
        // The constructor guarantees six valid hex digits.
        let byte = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or_default();
        RgbColor::new(byte(0), byte(2), byte(4))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for HexColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

pub fn rgb_to_hex(rgb: RgbColor) -> HexColor {
    HexColor(format!("{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b))
}

/// Parse exactly six hex digits (no `#`) into a color.
pub fn hex_to_rgb(hex: &str) -> Result<RgbColor, ColorError> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::MalformedInput {
            input: hex.to_string(),
        });
    }

    let parse = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| ColorError::MalformedInput {
            input: hex.to_string(),
        })
    };

    Ok(RgbColor::new(parse(0..2)?, parse(2..4)?, parse(4..6)?))
}

/// Unpack `0xRRGGBB`. Bits above the low 24 are ignored.
pub fn dec_to_rgb(value: impl Into<u32>) -> RgbColor {
    let value = value.into();
    RgbColor::new(
        ((value >> 16) & 0xFF) as u8,
        ((value >> 8) & 0xFF) as u8,
        (value & 0xFF) as u8,
    )
}

impl From<PackedColor> for u32 {
    fn from(color: PackedColor) -> Self {
        color.0
    }
}
