use crate::logging::{Diagnostic, Level, Logger};
use tracing::{error, warn};

/// A logger implementation that forwards diagnostics to the tracing crate
/// as structured fields instead of a preformatted line.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: Level, d: &Diagnostic) {
        let caller_file = d.location.file();
        let caller_line = d.location.line();
        let ts = d.timestamp;
        match level {
            Level::Error => error!(caller_file, caller_line, ts, "{}", d.message),
            Level::Warn => warn!(caller_file, caller_line, ts, "{}", d.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::SubscriberExt;

    type Fields = BTreeMap<&'static str, String>;

    #[derive(Clone, Default)]
    struct EventCapture {
        events: Arc<Mutex<Vec<(tracing::Level, Fields)>>>,
    }

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
            let mut visitor = FieldVisitor::default();
            event.record(&mut visitor);
            self.events
                .lock()
                .unwrap()
                .push((*event.metadata().level(), visitor.0));
        }
    }

    #[derive(Default)]
    struct FieldVisitor(Fields);

    impl tracing::field::Visit for FieldVisitor {
        fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
            self.0.insert(field.name(), value.to_string());
        }

        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            self.0.insert(field.name(), format!("{value:?}"));
        }
    }

    #[test]
    fn emits_caller_fields_at_matching_level() {
        let capture = EventCapture::default();
        let events = capture.events.clone();
        let subscriber = tracing_subscriber::registry().with(capture);

        let d = Diagnostic::capture("disk full");
        tracing::subscriber::with_default(subscriber, || {
            let logger = TracingLogger::new();
            logger.log(Level::Error, &d);
            logger.log(Level::Warn, &d);
        });

        let captured = events.lock().unwrap();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].0, tracing::Level::ERROR);
        assert_eq!(captured[1].0, tracing::Level::WARN);
        for (_, fields) in captured.iter() {
            assert_eq!(fields["caller_file"], d.location.file());
            assert_eq!(fields["caller_line"], d.location.line().to_string());
            assert_eq!(fields["ts"], d.timestamp.to_string());
            assert_eq!(fields["message"], "disk full");
        }
        assert!(d.location.file().ends_with("tracing_logger.rs"));
    }
}
