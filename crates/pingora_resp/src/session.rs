//! Glue between [`Context`] and a Pingora [`ServerSession`].

use bytes::BytesMut;
use http::{HeaderMap, StatusCode};
use pingora::protocols::http::ServerSession;
use pingora_http::{RequestHeader, ResponseHeader};

use crate::error::SessionError;
use crate::logging::{self, Diagnostic, Level};
use crate::resp::{Context, ErrorInfo, JsonResponder, Request, Response};

/// Limits applied while reading a request into a [`Context`].
#[derive(Debug, Clone)]
pub struct ReadLimits {
    /// Maximum request body size in bytes (default: 1MB)
    pub max_body_size: usize,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

impl ReadLimits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum body size
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    fn admits(&self, len: u64) -> bool {
        len <= self.max_body_size as u64
    }
}

impl Request {
    /// Copy method, path and headers out of a Pingora request head.
    pub fn from_request_header(header: &RequestHeader) -> Self {
        let path = String::from_utf8_lossy(header.raw_path()).to_string();
        let mut req = Request::new(header.method.clone(), path);
        for (name, value) in header.headers.iter() {
            req = req.header(name.clone(), value.clone());
        }
        req
    }

    /// Request head only; the body is left unread.
    pub fn from_session(session: &ServerSession) -> Self {
        Self::from_request_header(session.req_header())
    }
}

fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(http::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
}

/// Read the body only when hinted by headers (content-length > 0 or
/// transfer-encoding present).
fn has_body(headers: &HeaderMap) -> bool {
    headers.contains_key(http::header::TRANSFER_ENCODING)
        || content_length(headers).unwrap_or(0) > 0
}

/// A context that already answers 413. The request keeps an empty body.
fn too_large(req: Request, limits: &ReadLimits, received: u64) -> Context {
    let diagnostic = Diagnostic::capture(format!(
        "request body too large: {} > {}",
        received, limits.max_body_size
    ));
    logging::logger::emit(Level::Warn, &diagnostic);
    let mut ctx = Context::new(req);
    ctx.abort_with_status_json(StatusCode::PAYLOAD_TOO_LARGE, &ErrorInfo::PAYLOAD_TOO_LARGE);
    ctx
}

impl Response {
    /// Build the Pingora response head, adding `content-length` unless a
    /// length or transfer-encoding was set by hand.
    pub fn to_response_header(&self) -> Result<ResponseHeader, SessionError> {
        let mut builder = http::Response::builder().status(self.status);
        for (k, v) in self.headers.iter() {
            builder = builder.header(k, v);
        }
        if !self.headers.contains_key(http::header::CONTENT_LENGTH)
            && !self.headers.contains_key(http::header::TRANSFER_ENCODING)
        {
            builder = builder.header(http::header::CONTENT_LENGTH, self.body.len());
        }
        let (parts, _) = builder.body(())?.into_parts();
        Ok(parts.into())
    }

    /// Write head and body. With `head_only` the body is skipped, as for a
    /// HEAD request.
    pub async fn write_to(
        self,
        session: &mut ServerSession,
        head_only: bool,
    ) -> Result<(), SessionError> {
        let header = self.to_response_header()?;
        session.write_response_header(Box::new(header)).await?;
        if !head_only {
            session.write_response_body(self.body, true).await?;
        }
        Ok(())
    }
}

impl Context {
    /// Build a context from a session whose request head was already read,
    /// pulling in the body when one is announced. Uses [`ReadLimits::default`].
    pub async fn read_from(session: &mut ServerSession) -> Result<Self, SessionError> {
        Self::read_from_with(session, &ReadLimits::default()).await
    }

    /// Like [`Context::read_from`] with explicit limits.
    ///
    /// A body over `max_body_size` is not buffered. The returned context is
    /// already aborted with a 413 `{"code":0,"msg":"Payload Too Large"}` and
    /// keep-alive is turned off, since the rest of the body stays unread.
    pub async fn read_from_with(
        session: &mut ServerSession,
        limits: &ReadLimits,
    ) -> Result<Self, SessionError> {
        let req = Request::from_session(session);
        if req.is_head() || !has_body(req.headers()) {
            return Ok(Context::new(req));
        }
        if let Some(announced) = content_length(req.headers()).filter(|&n| !limits.admits(n)) {
            session.set_keepalive(None);
            return Ok(too_large(req, limits, announced));
        }

        let mut body = BytesMut::new();
        while let Some(chunk) = session.read_request_body().await? {
            let received = (body.len() + chunk.len()) as u64;
            if !limits.admits(received) {
                session.set_keepalive(None);
                return Ok(too_large(req, limits, received));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(Context::new(req.with_body(body.freeze())))
    }

    /// Write the committed response to `session`. A handler that wrote
    /// nothing gets an empty 200.
    pub async fn finish(self, session: &mut ServerSession) -> Result<(), SessionError> {
        let head_only = self.request().is_head();
        let (_, res) = self.into_parts();
        let res = res.unwrap_or_else(|| Response::empty(StatusCode::OK));
        tracing::debug!(status = res.status.as_u16(), head_only, "finishing session");
        res.write_to(session, head_only).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resp::{self, ErrorInfo};
    use http::{HeaderValue, Method};

    #[test]
    fn request_from_pingora_header() {
        let mut head = RequestHeader::build("POST", b"/users?id=7", None).unwrap();
        head.insert_header("content-type", "application/json").unwrap();
        let req = Request::from_request_header(&head);
        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.path(), "/users");
        assert_eq!(req.uri().query(), Some("id=7"));
        assert_eq!(req.headers().get("content-type").unwrap(), "application/json");
    }

    #[test]
    fn response_header_gets_content_length() {
        let mut ctx = Context::new(Request::new(Method::GET, "/"));
        resp::with_code_and_message(ErrorInfo::new(1, "x")).bad_request(&mut ctx);
        let res = ctx.take_response().unwrap();
        let len = res.body.len().to_string();
        let head = res.to_response_header().unwrap();
        assert_eq!(head.status, StatusCode::BAD_REQUEST);
        assert_eq!(head.headers.get("content-length").unwrap(), len.as_str());
        assert_eq!(
            head.headers.get("content-type").unwrap(),
            "application/json; charset=utf-8"
        );
    }

    #[test]
    fn manual_length_is_kept() {
        let mut res = Response::empty(StatusCode::OK);
        res.headers
            .insert(http::header::CONTENT_LENGTH, HeaderValue::from_static("999"));
        let head = res.to_response_header().unwrap();
        assert_eq!(
            head.headers.get(http::header::CONTENT_LENGTH),
            Some(&HeaderValue::from_static("999"))
        );
    }

    #[test]
    fn body_hint_from_headers() {
        let mut h = HeaderMap::new();
        assert!(!has_body(&h));
        h.insert(http::header::CONTENT_LENGTH, HeaderValue::from_static("0"));
        assert!(!has_body(&h));
        h.insert(http::header::CONTENT_LENGTH, HeaderValue::from_static("12"));
        assert!(has_body(&h));
        h.remove(http::header::CONTENT_LENGTH);
        h.insert(http::header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        assert!(has_body(&h));
    }

    #[test]
    fn body_limit_defaults_to_one_mebibyte() {
        assert_eq!(ReadLimits::default().max_body_size, 1024 * 1024);
        let limits = ReadLimits::new().max_body_size(16);
        assert_eq!(limits.max_body_size, 16);
    }

    #[test]
    fn body_cap_check() {
        let limits = ReadLimits::new().max_body_size(16);
        assert!(limits.admits(0));
        assert!(limits.admits(16));
        assert!(!limits.admits(17));
        assert!(!ReadLimits::new().admits(1024 * 1024 + 1));

        let mut h = HeaderMap::new();
        assert_eq!(content_length(&h), None);
        h.insert(http::header::CONTENT_LENGTH, HeaderValue::from_static("17"));
        assert_eq!(content_length(&h), Some(17));
        assert!(!content_length(&h).is_some_and(|n| limits.admits(n)));
        h.insert(http::header::CONTENT_LENGTH, HeaderValue::from_static("nope"));
        assert_eq!(content_length(&h), None);
    }

    #[test]
    fn oversized_body_yields_ready_413() {
        let req = Request::new(Method::POST, "/upload");
        let limits = ReadLimits::new().max_body_size(4);
        let ctx = too_large(req, &limits, 5);
        assert!(ctx.is_aborted());
        assert!(ctx.request().body().is_empty());
        let res = ctx.response().unwrap();
        assert_eq!(res.status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            res.json_body(),
            Some(serde_json::json!({"code": 0, "msg": "Payload Too Large"}))
        );
    }
}
