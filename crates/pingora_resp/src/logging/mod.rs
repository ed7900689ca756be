pub mod logger;
pub mod tracing_logger;

pub use logger::{Diagnostic, Level, Logger, StdoutLogger, reset_logger, set_logger};
pub use tracing_logger::TracingLogger;
