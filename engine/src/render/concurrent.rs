//! Rendering every entry on its own tokio task.
//!
//! Entries never share input or output files, so they can run side by side.
//! That only holds if no two entries write the same output path; the check
//! runs before any task is spawned. Each entry is bounded by
//! [`RenderOptions::entry_timeout`]; an entry that times out may leave a
//! partially written output behind.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::timeout;

use super::{EntryOutcome, Placeholders, RenderReport, substitute};
use crate::errors::RenderError;
use crate::events::{Event, EventSink};
use crate::registry::{TemplateEntry, TemplateRegistry};

pub const DEFAULT_ENTRY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub entry_timeout: Duration,
    pub dry_run: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            entry_timeout: DEFAULT_ENTRY_TIMEOUT,
            dry_run: false,
        }
    }
}

/// Render all entries concurrently. Outcomes come back in registry order.
pub async fn generate_concurrent(
    placeholders: Arc<Placeholders>,
    registry: &TemplateRegistry,
    options: RenderOptions,
    sink: Arc<dyn EventSink>,
) -> Result<RenderReport, RenderError> {
    if let Some((path, entries)) = registry.duplicate_outputs().into_iter().next() {
        return Err(RenderError::SharedOutput { path, entries });
    }

    let mut tasks = JoinSet::new();
    for (index, entry) in registry.entries().iter().cloned().enumerate() {
        let placeholders = Arc::clone(&placeholders);
        let sink = Arc::clone(&sink);

        tasks.spawn(async move {
            let outcome = match timeout(
                options.entry_timeout,
                render_entry(&entry, &placeholders, options.dry_run, sink.as_ref()),
            )
            .await
            {
                Ok(outcome) => outcome,
                Err(_) => EntryOutcome::TimedOut {
                    name: entry.name.clone(),
                    output_path: entry.output_path.clone(),
                    after: options.entry_timeout,
                },
            };
            sink.emit(outcome.to_event(options.dry_run));
            (index, outcome)
        });
    }

    let mut slots: Vec<Option<EntryOutcome>> = vec![None; registry.len()];
    while let Some(joined) = tasks.join_next().await {
        // A panicked task leaves its slot empty; it is filled in below.
        if let Ok((index, outcome)) = joined {
            slots[index] = Some(outcome);
        }
    }

    let outcomes = slots
        .into_iter()
        .zip(registry.entries())
        .map(|(slot, entry)| {
            slot.unwrap_or_else(|| {
                let outcome = EntryOutcome::WriteFailed {
                    name: entry.name.clone(),
                    path: entry.output_path.clone(),
                    kind: std::io::ErrorKind::Other,
                    detail: "render task aborted".to_string(),
                };
                sink.emit(outcome.to_event(options.dry_run));
                outcome
            })
        })
        .collect::<Vec<_>>();

    Ok(outcomes.into())
}

async fn render_entry(
    entry: &TemplateEntry,
    placeholders: &Placeholders,
    dry_run: bool,
    sink: &dyn EventSink,
) -> EntryOutcome {
    let template = match tokio::fs::read_to_string(&entry.template_path).await {
        Ok(template) => template,
        Err(e) => return EntryOutcome::read_failed(entry, &e),
    };
    sink.emit(Event::EntryRead {
        name: entry.name.clone(),
        path: entry.template_path.clone(),
    });

    let rendered = substitute(&template, placeholders);

    if !dry_run {
        if let Err(e) = tokio::fs::write(&entry.output_path, rendered).await {
            return EntryOutcome::write_failed(entry, &e);
        }
    }

    EntryOutcome::Written {
        name: entry.name.clone(),
        output_path: entry.output_path.clone(),
    }
}
