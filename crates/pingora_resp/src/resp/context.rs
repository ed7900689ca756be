use http::StatusCode;
use serde::Serialize;

use crate::resp::{Request, Response};

/// The two write operations a response builder needs from the host framework.
pub trait JsonResponder {
    /// Write `value` as JSON with `status`.
    fn json<T: Serialize + ?Sized>(&mut self, status: StatusCode, value: &T);

    /// Write `value` as JSON with `status` and tell the pipeline to stop
    /// running further stages for this request.
    fn abort_with_status_json<T: Serialize + ?Sized>(&mut self, status: StatusCode, value: &T);
}

/// Per-request context: the incoming request, the committed response and
/// the abort flag a pipeline consults between stages.
///
/// Only the first write is kept. Once a response is committed later writes
/// are dropped with a warning.
#[derive(Debug)]
pub struct Context {
    request: Request,
    response: Option<Response>,
    aborted: bool,
}

impl Context {
    pub fn new(request: Request) -> Self {
        Self {
            request,
            response: None,
            aborted: false,
        }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Stop the pipeline without writing anything.
    pub fn abort(&mut self) {
        self.aborted = true;
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    pub fn is_written(&self) -> bool {
        self.response.is_some()
    }

    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    pub fn take_response(&mut self) -> Option<Response> {
        self.response.take()
    }

    pub fn into_parts(self) -> (Request, Option<Response>) {
        (self.request, self.response)
    }

    fn commit(&mut self, res: Response) {
        if let Some(prev) = &self.response {
            tracing::warn!(
                path = self.request.path(),
                committed = prev.status.as_u16(),
                dropped = res.status.as_u16(),
                "response already written, ignoring second write"
            );
            return;
        }
        tracing::debug!(
            path = self.request.path(),
            status = res.status.as_u16(),
            aborted = self.aborted,
            "response written"
        );
        self.response = Some(res);
    }
}

impl JsonResponder for Context {
    fn json<T: Serialize + ?Sized>(&mut self, status: StatusCode, value: &T) {
        self.commit(Response::json(status, value));
    }

    fn abort_with_status_json<T: Serialize + ?Sized>(&mut self, status: StatusCode, value: &T) {
        self.abort();
        self.commit(Response::json(status, value));
    }
}
