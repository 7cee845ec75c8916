//! # tincture engine
//!
//! Core library behind the `tincture` command: turns a Material palette pair
//! into rendered configuration files.
//!
//! ## Modules
//!
//! - [`color`] - packed / rgb / hex color conversions
//! - [`scheme`] - palette pairs and the scheme selected from them
//! - [`registry`] - the template → output registry loaded from INI or TOML
//! - [`render`] - placeholder substitution and per-entry rendering
//! - [`events`] - event sink passed into the loader and renderer
//! - [`errors`] - error types for all of the above

pub mod color;
pub mod errors;
pub mod events;
pub mod registry;
pub mod render;
pub mod scheme;

pub use color::{HexColor, PackedColor, RgbColor};
pub use errors::{ColorError, PaletteError, RegistryError, RenderError};
pub use events::{Event, EventSink, FailureKind};
pub use registry::{TemplateEntry, TemplateRegistry};
pub use render::{EntryOutcome, RenderReport, Renderer};
pub use scheme::{HexScheme, Mode, PalettePair, Scheme};
