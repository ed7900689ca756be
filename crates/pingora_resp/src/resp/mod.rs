pub mod builder;
pub mod context;
pub mod info;
pub mod request;
pub mod response;
pub mod shortcuts;

pub use builder::{Payload, ResponseBuilder};
pub use context::{Context, JsonResponder};
pub use http::Method;
pub use info::ErrorInfo;
pub use request::Request;
pub use response::Response;
pub use shortcuts::*;
