//! Rendering templates into their output files.
//!
//! Every registry entry is handled on its own: read the template, substitute
//! placeholders, write the output. A failure in one entry is recorded in the
//! [`RenderReport`] and the next entry is processed as if nothing happened.
//! Output directories are expected to exist already.

pub mod concurrent;
pub mod placeholder;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::events::{Event, EventSink, FailureKind};
use crate::registry::{TemplateEntry, TemplateRegistry};
use crate::scheme::{HexScheme, Scheme};

pub use placeholder::{Placeholders, substitute};

/// What happened to one registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Written {
        name: String,
        output_path: PathBuf,
    },
    ReadFailed {
        name: String,
        path: PathBuf,
        kind: io::ErrorKind,
        detail: String,
    },
    WriteFailed {
        name: String,
        path: PathBuf,
        kind: io::ErrorKind,
        detail: String,
    },
    TimedOut {
        name: String,
        output_path: PathBuf,
        after: Duration,
    },
}

impl EntryOutcome {
    pub fn name(&self) -> &str {
        match self {
            EntryOutcome::Written { name, .. }
            | EntryOutcome::ReadFailed { name, .. }
            | EntryOutcome::WriteFailed { name, .. }
            | EntryOutcome::TimedOut { name, .. } => name,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, EntryOutcome::Written { .. })
    }

    fn read_failed(entry: &TemplateEntry, error: &io::Error) -> Self {
        EntryOutcome::ReadFailed {
            name: entry.name.clone(),
            path: entry.template_path.clone(),
            kind: error.kind(),
            detail: error.to_string(),
        }
    }

    fn write_failed(entry: &TemplateEntry, error: &io::Error) -> Self {
        EntryOutcome::WriteFailed {
            name: entry.name.clone(),
            path: entry.output_path.clone(),
            kind: error.kind(),
            detail: error.to_string(),
        }
    }

    /// The matching sink event for a finished entry.
    fn to_event(&self, dry_run: bool) -> Event {
        match self {
            EntryOutcome::Written { name, output_path } => Event::EntryWritten {
                name: name.clone(),
                path: output_path.clone(),
                dry_run,
            },
            EntryOutcome::ReadFailed {
                name, path, detail, ..
            } => Event::EntryFailed {
                name: name.clone(),
                kind: FailureKind::Read,
                path: path.clone(),
                detail: detail.clone(),
            },
            EntryOutcome::WriteFailed {
                name, path, detail, ..
            } => Event::EntryFailed {
                name: name.clone(),
                kind: FailureKind::Write,
                path: path.clone(),
                detail: detail.clone(),
            },
            EntryOutcome::TimedOut {
                name,
                output_path,
                after,
            } => Event::EntryFailed {
                name: name.clone(),
                kind: FailureKind::Timeout,
                path: output_path.clone(),
                detail: format!("timed out after {}ms", after.as_millis()),
            },
        }
    }
}

/// Outcomes of one render pass, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    outcomes: Vec<EntryOutcome>,
}

impl RenderReport {
    pub fn outcomes(&self) -> &[EntryOutcome] {
        &self.outcomes
    }

    pub fn written(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_written()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.written()
    }

    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }

    pub fn get(&self, name: &str) -> Option<&EntryOutcome> {
        self.outcomes.iter().find(|o| o.name() == name)
    }
}

impl From<Vec<EntryOutcome>> for RenderReport {
    fn from(outcomes: Vec<EntryOutcome>) -> Self {
        Self { outcomes }
    }
}

/// Sequential renderer over a registry.
#[derive(Debug, Clone)]
pub struct Renderer {
    placeholders: Placeholders,
    dry_run: bool,
}

impl Renderer {
    pub fn new(scheme: &Scheme, wallpaper: &Path) -> Self {
        Self::from_placeholders(Placeholders::from_scheme(scheme, wallpaper))
    }

    pub fn from_placeholders(placeholders: Placeholders) -> Self {
        Self {
            placeholders,
            dry_run: false,
        }
    }

    /// Render everything but skip the final write.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn placeholders(&self) -> &Placeholders {
        &self.placeholders
    }

    pub fn generate(&self, registry: &TemplateRegistry, sink: &dyn EventSink) -> RenderReport {
        registry
            .entries()
            .iter()
            .map(|entry| self.render_entry(entry, sink))
            .collect::<Vec<_>>()
            .into()
    }

    pub fn render_entry(&self, entry: &TemplateEntry, sink: &dyn EventSink) -> EntryOutcome {
        let outcome = self.try_render_entry(entry, sink);
        sink.emit(outcome.to_event(self.dry_run));
        outcome
    }

    fn try_render_entry(&self, entry: &TemplateEntry, sink: &dyn EventSink) -> EntryOutcome {
        let template = match std::fs::read_to_string(&entry.template_path) {
            Ok(template) => template,
            Err(e) => return EntryOutcome::read_failed(entry, &e),
        };
        sink.emit(Event::EntryRead {
            name: entry.name.clone(),
            path: entry.template_path.clone(),
        });

        let rendered = substitute(&template, &self.placeholders);

        if !self.dry_run {
            if let Err(e) = std::fs::write(&entry.output_path, rendered) {
                return EntryOutcome::write_failed(entry, &e);
            }
        }

        EntryOutcome::Written {
            name: entry.name.clone(),
            output_path: entry.output_path.clone(),
        }
    }
}

/// Render every entry of `registry` with the colors in `scheme_hex`.
pub fn generate(
    scheme_hex: &HexScheme,
    registry: &TemplateRegistry,
    wallpaper: &Path,
    sink: &dyn EventSink,
) -> RenderReport {
    Renderer::from_placeholders(Placeholders::from_hex(scheme_hex, wallpaper))
        .generate(registry, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PackedColor;
    use crate::events::RecordingSink;
    use crate::scheme::{Mode, Palette, PalettePair};

    fn white_scheme() -> Scheme {
        let palette: Palette = [("primary".to_string(), PackedColor::new(16_777_215))]
            .into_iter()
            .collect();
        Scheme::select(
            &PalettePair::new(palette.clone(), palette).unwrap(),
            Mode::Dark,
        )
    }

    #[test]
    fn test_render_entry_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("in.conf");
        let output = dir.path().join("out.conf");
        std::fs::write(&template, "fg=@{primary.hex}\n").unwrap();

        let renderer = Renderer::new(&white_scheme(), Path::new("/tmp/wp.jpg"));
        let sink = RecordingSink::new();
        let outcome = renderer.render_entry(&TemplateEntry::new("t", &template, &output), &sink);

        assert!(outcome.is_written());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "fg=#ffffff\n");
        assert_eq!(sink.events().len(), 2);
    }

    #[test]
    fn test_dry_run_skips_write() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("in.conf");
        let output = dir.path().join("out.conf");
        std::fs::write(&template, "@{primary}").unwrap();

        let renderer =
            Renderer::new(&white_scheme(), Path::new("/tmp/wp.jpg")).with_dry_run(true);
        let sink = RecordingSink::new();
        let outcome = renderer.render_entry(&TemplateEntry::new("t", &template, &output), &sink);

        assert!(outcome.is_written());
        assert!(!output.exists());
        assert!(sink.events().iter().any(|e| matches!(
            e,
            Event::EntryWritten { dry_run: true, .. }
        )));
    }

    #[test]
    fn test_missing_output_directory_is_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("in.conf");
        let output = dir.path().join("missing/out.conf");
        std::fs::write(&template, "x").unwrap();

        let renderer = Renderer::new(&white_scheme(), Path::new("/tmp/wp.jpg"));
        let outcome = renderer.render_entry(
            &TemplateEntry::new("t", &template, &output),
            &crate::events::NullSink,
        );

        match outcome {
            EntryOutcome::WriteFailed { name, kind, .. } => {
                assert_eq!(name, "t");
                assert_eq!(kind, io::ErrorKind::NotFound);
            }
            other => panic!("expected write failure, got {other:?}"),
        }
        assert!(!output.parent().unwrap().exists());
    }

    #[test]
    fn test_invalid_utf8_template_is_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("in.bin");
        std::fs::write(&template, [0xff, 0xfe, 0x00]).unwrap();

        let renderer = Renderer::new(&white_scheme(), Path::new("/tmp/wp.jpg"));
        let outcome = renderer.render_entry(
            &TemplateEntry::new("bin", &template, dir.path().join("out")),
            &crate::events::NullSink,
        );

        assert!(matches!(
            outcome,
            EntryOutcome::ReadFailed { kind: io::ErrorKind::InvalidData, .. }
        ));
    }

    #[test]
    fn test_report_counts() {
        let report = RenderReport::from(vec![
            EntryOutcome::Written {
                name: "a".into(),
                output_path: "/a".into(),
            },
            EntryOutcome::TimedOut {
                name: "b".into(),
                output_path: "/b".into(),
                after: Duration::from_millis(5),
            },
        ]);

        assert_eq!(report.written(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_clean());
        assert_eq!(report.get("b").map(EntryOutcome::name), Some("b"));
    }

    #[test]
    fn test_timeout_event_names_the_output() {
        let outcome = EntryOutcome::TimedOut {
            name: "slow".into(),
            output_path: "/out/slow.css".into(),
            after: Duration::from_millis(250),
        };

        assert_eq!(
            outcome.to_event(false),
            Event::EntryFailed {
                name: "slow".into(),
                kind: FailureKind::Timeout,
                path: PathBuf::from("/out/slow.css"),
                detail: "timed out after 250ms".into(),
            }
        );
    }
}
