use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A `(code, msg)` classification written as the JSON body of a response.
///
/// `code` is application defined; `0` means "unset". The predefined
/// classifications all carry `code == 0` and differ only by message, so
/// callers that need to tell them apart by code must set one explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: i64,
    #[serde(rename = "msg")]
    pub message: Cow<'static, str>,
}

impl ErrorInfo {
    pub const OK: ErrorInfo = ErrorInfo::from_static(0, "OK");
    pub const BAD_REQUEST: ErrorInfo = ErrorInfo::from_static(0, "Bad Request");
    pub const UNAUTHORIZED: ErrorInfo = ErrorInfo::from_static(0, "Unauthorized");
    pub const FORBIDDEN: ErrorInfo = ErrorInfo::from_static(0, "Forbidden");
    pub const NOT_FOUND: ErrorInfo = ErrorInfo::from_static(0, "Not found");
    pub const INTERNAL_ERROR: ErrorInfo = ErrorInfo::from_static(0, "Internal Error");
    /// Written by [`Context::read_from`](crate::Context::read_from) when a
    /// request body exceeds its limit.
    pub const PAYLOAD_TOO_LARGE: ErrorInfo = ErrorInfo::from_static(0, "Payload Too Large");

    pub fn new<S: Into<String>>(code: i64, message: S) -> Self {
        Self {
            code,
            message: Cow::Owned(message.into()),
        }
    }

    /// Usable in `const` position, e.g. for an application's own catalog.
    pub const fn from_static(code: i64, message: &'static str) -> Self {
        Self {
            code,
            message: Cow::Borrowed(message),
        }
    }

    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True when neither field carries a value.
    pub fn is_unset(&self) -> bool {
        self.code == 0 && self.message.is_empty()
    }
}
