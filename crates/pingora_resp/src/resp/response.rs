use bytes::Bytes;
use http::{HeaderMap, HeaderValue, StatusCode};

/// A fully buffered HTTP response, ready to be written to a session.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Construct an empty response with given status. Does not set content-type.
    pub fn empty(status: StatusCode) -> Self {
        Self::new(status)
    }

    /// Construct a JSON response from any serializable value.
    pub fn json<T: serde::Serialize + ?Sized>(status: StatusCode, value: &T) -> Self {
        let mut res = Self::new(status);
        res.headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );

        match serde_json::to_vec(value) {
            Ok(bytes) => {
                res.body = Bytes::from(bytes);
                res
            }
            Err(e) => {
                // serialization failed; return 500 with empty body
                tracing::error!(error = %e, status = %status, "failed to serialize JSON body");
                res.status = StatusCode::INTERNAL_SERVER_ERROR;
                res.body = Bytes::new();
                res
            }
        }
    }

    /// Parse the body back as JSON. Mostly useful in tests and logging.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.body).ok()
    }
}
