//! Event capture for asserting on diagnostics in tests.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

/// Events from this crate recorded while a closure ran, as
/// `(level, rendered fields)`. Events from dependencies are ignored.
#[derive(Clone, Default)]
pub(crate) struct Captured(Arc<Mutex<Vec<(Level, String)>>>);

impl Captured {
    /// Events at `level` or more severe.
    pub(crate) fn at_least(&self, level: Level) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l <= level)
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub(crate) fn all(&self) -> Vec<String> {
        self.at_least(Level::TRACE)
    }
}

struct FieldWriter(String);

impl Visit for FieldWriter {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if !self.0.is_empty() {
            self.0.push(' ');
        }
        self.0.push_str(&format!("{}={:?}", field.name(), value));
    }
}

struct CaptureLayer(Captured);

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with(env!("CARGO_CRATE_NAME")) {
            return;
        }
        let mut writer = FieldWriter(String::new());
        event.record(&mut writer);
        let Captured(events) = &self.0;
        events
            .lock()
            .unwrap()
            .push((*event.metadata().level(), writer.0));
    }
}

/// Run `f` with a subscriber that records every event on this thread.
pub(crate) fn capture<T>(f: impl FnOnce() -> T) -> (T, Captured) {
    let captured = Captured::default();
    let subscriber = Registry::default().with(CaptureLayer(captured.clone()));
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, captured)
}
