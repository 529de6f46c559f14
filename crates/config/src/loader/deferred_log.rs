//! Buffered log for resolution decisions.
//!
//! Resolution runs before the host has finished installing its logging, so
//! entries are held in memory until `switch_over()` replays them into
//! `tracing`. After the switch every entry is emitted immediately.
//!
//! Invariants:
//! - Replay preserves recording order.
//! - Nothing is dropped: an entry is either buffered or emitted.

use tracing::Level;

const TARGET: &str = "confstack::loader";

/// A buffered log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
}

/// Log that buffers entries until the host's logging is ready.
#[derive(Debug, Default)]
pub struct DeferredLog {
    entries: Vec<LogEntry>,
    switched: bool,
}

impl DeferredLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trace(&mut self, message: impl Into<String>) {
        self.record(Level::TRACE, message.into());
    }

    pub fn debug(&mut self, message: impl Into<String>) {
        self.record(Level::DEBUG, message.into());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.record(Level::INFO, message.into());
    }

    /// Entries recorded and not yet replayed.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn is_switched(&self) -> bool {
        self.switched
    }

    /// Replay buffered entries into `tracing` and emit directly from now on.
    pub fn switch_over(&mut self) {
        self.switched = true;
        for entry in self.entries.drain(..) {
            emit(&entry);
        }
    }

    fn record(&mut self, level: Level, message: String) {
        let entry = LogEntry { level, message };
        if self.switched {
            emit(&entry);
        } else {
            self.entries.push(entry);
        }
    }
}

fn emit(entry: &LogEntry) {
    let message = entry.message.as_str();
    match entry.level {
        Level::TRACE => tracing::trace!(target: TARGET, "{message}"),
        Level::DEBUG => tracing::debug!(target: TARGET, "{message}"),
        Level::INFO => tracing::info!(target: TARGET, "{message}"),
        Level::WARN => tracing::warn!(target: TARGET, "{message}"),
        _ => tracing::error!(target: TARGET, "{message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    /// Minimal subscriber recording `(target, message)` of every event.
    #[derive(Clone, Default)]
    struct CapturingSubscriber {
        events: Arc<Mutex<Vec<(String, String)>>>,
        next_id: Arc<AtomicU64>,
    }

    struct MessageVisitor {
        message: Option<String>,
    }

    impl tracing::field::Visit for MessageVisitor {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.message = Some(format!("{value:?}"));
            }
        }
    }

    impl tracing::Subscriber for CapturingSubscriber {
        fn enabled(&self, _metadata: &tracing::Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, _attrs: &tracing::span::Attributes<'_>) -> tracing::span::Id {
            tracing::span::Id::from_u64(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
        }

        fn record(&self, _span: &tracing::span::Id, _values: &tracing::span::Record<'_>) {}

        fn record_follows_from(&self, _span: &tracing::span::Id, _follows: &tracing::span::Id) {}

        fn event(&self, event: &tracing::Event<'_>) {
            let mut visitor = MessageVisitor { message: None };
            event.record(&mut visitor);
            if let Some(message) = visitor.message {
                self.events
                    .lock()
                    .expect("lock poisoned")
                    .push((event.metadata().target().to_string(), message));
            }
        }

        fn enter(&self, _span: &tracing::span::Id) {}

        fn exit(&self, _span: &tracing::span::Id) {}

        fn register_callsite(
            &self,
            _metadata: &'static tracing::Metadata<'static>,
        ) -> tracing::subscriber::Interest {
            tracing::subscriber::Interest::always()
        }
    }

    fn capture<F: FnOnce()>(f: F) -> Vec<(String, String)> {
        let subscriber = CapturingSubscriber::default();
        let dispatch = tracing::Dispatch::new(subscriber.clone());
        tracing::dispatcher::with_default(&dispatch, f);
        std::mem::take(&mut *subscriber.events.lock().expect("lock poisoned"))
    }

    #[test]
    fn test_entries_buffer_until_switch() {
        let mut log = DeferredLog::new();
        log.trace("Skipped missing config");
        log.debug("Loaded config file");
        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.entries()[0].level, Level::TRACE);
        assert_eq!(log.entries()[1].message, "Loaded config file");

        log.switch_over();
        assert!(log.is_switched());
        assert!(log.entries().is_empty());

        log.info("emitted directly");
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_switch_over_replays_in_order() {
        let mut log = DeferredLog::new();
        log.trace("first");
        log.debug("second");

        let events = capture(|| {
            log.switch_over();
            log.info("third");
        });
        let messages: Vec<&str> = events.iter().map(|(_, m)| m.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
        assert!(events.iter().all(|(target, _)| target == "confstack::loader"));
    }
}
