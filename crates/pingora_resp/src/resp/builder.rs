use http::StatusCode;
use serde::Serialize;
use std::fmt::Display;
use std::panic::Location;

use crate::error::Reportable;
use crate::logging::{self, Diagnostic, Level};
use crate::resp::{ErrorInfo, JsonResponder};

/// Body of a success response: the caller's payload, or a classification
/// when the caller had none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload<T> {
    Data(T),
    Info(ErrorInfo),
}

/// One-shot builder for a JSON response.
///
/// Configure with the `with_*` methods, then finish with exactly one terminal
/// call (`success`, `bad_request`, `internal_error`, ...). The error
/// terminals always abort the request pipeline; `success` only aborts when
/// [`abort`](Self::abort) was called first.
///
/// ```ignore
/// ResponseBuilder::new()
///     .with_code(403001)
///     .with_message("username taken")
///     .forbidden(&mut ctx);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResponseBuilder {
    info: ErrorInfo,
    aborted: bool,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.info.code = code;
        self
    }

    /// Set the message. Use `format_args!` to join several values.
    pub fn with_message<M: Display>(mut self, message: M) -> Self {
        self.info.message = message.to_string().into();
        self
    }

    pub fn with_code_and_message(mut self, info: ErrorInfo) -> Self {
        self.info = info;
        self
    }

    pub fn abort(mut self) -> Self {
        self.aborted = true;
        self
    }

    /// Print `err` together with the caller's location.
    #[track_caller]
    pub fn log<E: Display>(self, err: E) -> Self {
        let diagnostic = Diagnostic::at(Location::caller(), err.to_string());
        logging::logger::emit(Level::Error, &diagnostic);
        self
    }

    /// True when `err` carries an error. No side effects.
    pub fn try_error<R: Reportable + ?Sized>(&self, err: &R) -> bool {
        err.is_present()
    }

    pub fn code(&self) -> i64 {
        self.info.code
    }

    pub fn message(&self) -> &str {
        &self.info.message
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// `base` with every field this builder has set laid over it.
    pub fn cover_data(&self, base: &ErrorInfo) -> ErrorInfo {
        let mut data = base.clone();
        if self.info.code != 0 {
            data.code = self.info.code;
        }
        if !self.info.message.is_empty() {
            data.message = self.info.message.clone();
        }
        data
    }

    /// Pass `data` through, or fall back to [`ErrorInfo::OK`] overlaid with
    /// this builder's fields.
    pub fn default_data<T>(&self, data: Option<T>) -> Payload<T> {
        match data {
            Some(data) => Payload::Data(data),
            None => Payload::Info(self.cover_data(&ErrorInfo::OK)),
        }
    }

    fn finish_context<C, T>(&self, ctx: &mut C, status: StatusCode, data: &T)
    where
        C: JsonResponder,
        T: Serialize + ?Sized,
    {
        if self.aborted {
            ctx.abort_with_status_json(status, data);
            return;
        }
        ctx.json(status, data);
    }

    fn fail<C: JsonResponder>(mut self, ctx: &mut C, status: StatusCode, base: &ErrorInfo) -> Self {
        self.aborted = true;
        let data = self.cover_data(base);
        self.finish_context(ctx, status, &data);
        self
    }

    pub fn internal_error<C: JsonResponder>(self, ctx: &mut C) -> Self {
        self.fail(ctx, StatusCode::INTERNAL_SERVER_ERROR, &ErrorInfo::INTERNAL_ERROR)
    }

    pub fn forbidden<C: JsonResponder>(self, ctx: &mut C) -> Self {
        self.fail(ctx, StatusCode::FORBIDDEN, &ErrorInfo::FORBIDDEN)
    }

    pub fn not_found<C: JsonResponder>(self, ctx: &mut C) -> Self {
        self.fail(ctx, StatusCode::NOT_FOUND, &ErrorInfo::NOT_FOUND)
    }

    pub fn unauthorized<C: JsonResponder>(self, ctx: &mut C) -> Self {
        self.fail(ctx, StatusCode::UNAUTHORIZED, &ErrorInfo::UNAUTHORIZED)
    }

    pub fn bad_request<C: JsonResponder>(self, ctx: &mut C) -> Self {
        self.fail(ctx, StatusCode::BAD_REQUEST, &ErrorInfo::BAD_REQUEST)
    }

    /// Write `data` (or the default classification when `None`) with 200.
    pub fn success<C: JsonResponder, T: Serialize>(self, ctx: &mut C, data: Option<T>) {
        let data = self.default_data(data);
        self.finish_context(ctx, StatusCode::OK, &data);
    }

    /// `success` without a payload.
    pub fn ok<C: JsonResponder>(self, ctx: &mut C) {
        self.success(ctx, None::<ErrorInfo>);
    }

    /// Answer 500 and return true when `err` carries an error; otherwise do
    /// nothing and return false.
    ///
    /// ```ignore
    /// if builder.check_internal_error(&mut ctx, &result) {
    ///     return;
    /// }
    /// ```
    pub fn check_internal_error<C, R>(&mut self, ctx: &mut C, err: &R) -> bool
    where
        C: JsonResponder,
        R: Reportable + ?Sized,
    {
        if !err.is_present() {
            return false;
        }
        self.aborted = true;
        let data = self.cover_data(&ErrorInfo::INTERNAL_ERROR);
        self.finish_context(ctx, StatusCode::INTERNAL_SERVER_ERROR, &data);
        true
    }
}
