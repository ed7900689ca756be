use std::panic::Location;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

/// Severity of a [`Diagnostic`]. `log` and `with_message_log` report errors;
/// requests refused while being read are warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warn,
    Error,
}

/// A diagnostic line: unix timestamp, call site and message.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub timestamp: u64,
    pub location: &'static Location<'static>,
    pub message: String,
}

impl Diagnostic {
    /// Stamp `message` with the current time and the caller's location.
    ///
    /// The location resolves through every `#[track_caller]` frame, so a
    /// helper annotated with it reports its own caller.
    #[track_caller]
    pub fn capture<S: Into<String>>(message: S) -> Self {
        Self::at(Location::caller(), message)
    }

    pub fn at<S: Into<String>>(location: &'static Location<'static>, message: S) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self {
            timestamp,
            location,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] [{}:{}:{}] {}",
            self.timestamp,
            self.location.file(),
            self.location.line(),
            self.location.column(),
            self.message
        )
    }
}

pub trait Logger: Send + Sync {
    fn log(&self, level: Level, diagnostic: &Diagnostic);
}

/// Prints one unstructured line per diagnostic to stdout. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutLogger;

impl Logger for StdoutLogger {
    fn log(&self, _level: Level, diagnostic: &Diagnostic) {
        println!("{}", diagnostic);
    }
}

static LOGGER: RwLock<Option<Arc<dyn Logger>>> = RwLock::new(None);

/// Install the process-wide logger used by `log` and `with_message_log`.
pub fn set_logger<L: Logger + 'static>(logger: L) {
    let mut slot = LOGGER.write().unwrap_or_else(PoisonError::into_inner);
    *slot = Some(Arc::new(logger));
}

/// Go back to [`StdoutLogger`].
pub fn reset_logger() {
    let mut slot = LOGGER.write().unwrap_or_else(PoisonError::into_inner);
    *slot = None;
}

pub(crate) fn emit(level: Level, diagnostic: &Diagnostic) {
    // clone out of the lock so a logger may call set_logger
    let current = LOGGER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    match current {
        Some(logger) => logger.log(level, diagnostic),
        None => StdoutLogger.log(level, diagnostic),
    }
}
