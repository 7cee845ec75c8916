//! Events emitted by the registry loader and the renderer.
//!
//! The engine never writes log output itself. Callers pass an [`EventSink`]
//! and decide how each event is presented; the `tincture` binary forwards
//! them to the `log` facade, tests record them with [`RecordingSink`].

use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Read,
    Write,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    RegistryLoaded {
        source: PathBuf,
        count: usize,
    },
    EntryRejected {
        section: String,
        reason: String,
    },
    EntryRead {
        name: String,
        path: PathBuf,
    },
    EntryWritten {
        name: String,
        path: PathBuf,
        dry_run: bool,
    },
    EntryFailed {
        name: String,
        kind: FailureKind,
        path: PathBuf,
        detail: String,
    },
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: Event);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: Event) {}
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn failures(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|event| matches!(event, Event::EntryFailed { .. }))
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: Event) {
        match self.events.lock() {
            Ok(mut guard) => guard.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

impl<T: EventSink + ?Sized> EventSink for std::sync::Arc<T> {
    fn emit(&self, event: Event) {
        (**self).emit(event)
    }
}

impl<T: EventSink + ?Sized> EventSink for &T {
    fn emit(&self, event: Event) {
        (**self).emit(event)
    }
}
