mod reportable;
mod session_error;

pub use reportable::Reportable;
pub use session_error::SessionError;
