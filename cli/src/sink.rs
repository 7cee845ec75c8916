use engine::{Event, EventSink, FailureKind};

/// Forwards engine events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: Event) {
        match event {
            Event::RegistryLoaded { source, count } => {
                log::info!("Loaded {count} templates from {}", source.display());
            }
            Event::EntryRejected { section, reason } => {
                log::warn!("Skipping template [{section}]: {reason}");
            }
            Event::EntryRead { name, path } => {
                log::debug!("[{name}] read template {}", path.display());
            }
            Event::EntryWritten {
                name,
                path,
                dry_run: false,
            } => {
                log::info!("[{name}] exported to {}", path.display());
            }
            Event::EntryWritten {
                name,
                path,
                dry_run: true,
            } => {
                log::info!("[{name}] would export to {} (dry run)", path.display());
            }
            Event::EntryFailed {
                name,
                kind,
                path,
                detail,
            } => {
                let action = match kind {
                    FailureKind::Read => "could not read template",
                    FailureKind::Write => "could not write output",
                    FailureKind::Timeout => "timed out rendering",
                };
                log::error!("[{name}] {action} {}: {detail}", path.display());
            }
        }
    }
}
