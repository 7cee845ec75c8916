//! The placeholder grammar and its single-pass substitution.
//!
//! | placeholder      | replacement            |
//! |------------------|------------------------|
//! | `@{role}`        | `rrggbb`               |
//! | `@{role.hex}`    | `#rrggbb`              |
//! | `@{role.rgb}`    | `rgb(R, G, B)`         |
//! | `@{wallpaper}`   | absolute wallpaper path |
//!
//! Role names are compared as plain strings. Text produced by a replacement
//! is never scanned again, and anything that does not resolve is copied
//! through unchanged.

use std::collections::BTreeMap;
use std::path::Path;

use crate::scheme::{HexScheme, ResolvedColor, Scheme};

const OPEN: &str = "@{";
const CLOSE: char = '}';
const WALLPAPER: &str = "wallpaper";
const HEX_SUFFIX: &str = ".hex";
const RGB_SUFFIX: &str = ".rgb";

/// Everything a template may refer to during one render pass.
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    colors: BTreeMap<String, ResolvedColor>,
    wallpaper: String,
}

impl Placeholders {
    pub fn from_hex(scheme_hex: &HexScheme, wallpaper: &Path) -> Self {
        Self {
            colors: scheme_hex
                .iter()
                .map(|(role, hex)| (role.clone(), ResolvedColor::from(hex)))
                .collect(),
            wallpaper: absolute_display(wallpaper),
        }
    }

    pub fn from_scheme(scheme: &Scheme, wallpaper: &Path) -> Self {
        Self {
            colors: scheme
                .palette()
                .keys()
                .filter_map(|role| scheme.resolve(role).map(|color| (role.clone(), color)))
                .collect(),
            wallpaper: absolute_display(wallpaper),
        }
    }

    pub fn wallpaper(&self) -> &str {
        &self.wallpaper
    }

    /// Resolve the text between `@{` and `}`.
    fn resolve(&self, key: &str) -> Option<String> {
        if let Some(color) = self.colors.get(key) {
            return Some(color.hex.digits().to_string());
        }
        if key == WALLPAPER {
            return Some(self.wallpaper.clone());
        }
        if let Some(color) = key
            .strip_suffix(HEX_SUFFIX)
            .and_then(|role| self.colors.get(role))
        {
            return Some(color.hex.to_string());
        }
        key.strip_suffix(RGB_SUFFIX)
            .and_then(|role| self.colors.get(role))
            .map(|color| color.rgb.css())
    }
}

/// Replace every resolvable placeholder in `text`.
pub fn substitute(text: &str, placeholders: &Placeholders) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(OPEN) {
        output.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let body = &candidate[OPEN.len()..];

        // Nothing after this point can close a placeholder.
        let Some(end) = body.find(CLOSE) else {
            rest = candidate;
            break;
        };

        let replacement = placeholders
            .resolve(&body[..end])
            .map(|value| (value, OPEN.len() + end + CLOSE.len_utf8()));

        match replacement {
            Some((value, consumed)) => {
                output.push_str(&value);
                rest = &candidate[consumed..];
            }
            None => {
                // Keep the '@' and look for the next opening after it, so
                // "@{@{primary}" still resolves the inner placeholder.
                output.push('@');
                rest = &candidate[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

fn absolute_display(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
