//! Uniform JSON responses for Pingora handlers.
//!
//! Every response body is either the handler's own payload or a
//! `{"code": .., "msg": ..}` classification. A [`ResponseBuilder`] collects an
//! optional code and message and then writes exactly one response to a
//! [`JsonResponder`] such as [`Context`]. The error helpers (`bad_request`,
//! `not_found`, ...) also flag the request as aborted so the host pipeline
//! can skip its remaining stages.
//!
//! ```ignore
//! use pingora_resp as resp;
//!
//! let mut ctx = resp::Context::read_from(&mut session).await?;
//! match load_user(ctx.request()) {
//!     Ok(user) => resp::success(&mut ctx, Some(user)),
//!     Err(e) => {
//!         resp::log(&e).with_code(404001).not_found(&mut ctx);
//!     }
//! }
//! ctx.finish(&mut session).await?;
//! ```

pub mod error;
pub mod logging;
pub mod resp;
pub mod session;

// Re-export commonly used types at the crate root
pub use error::{Reportable, SessionError};
pub use http::StatusCode;
pub use logging::*;
pub use resp::*;
pub use session::ReadLimits;
