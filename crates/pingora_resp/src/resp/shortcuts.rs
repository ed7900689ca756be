//! One-call helpers: each builds a fresh [`ResponseBuilder`] and delegates.

use serde::Serialize;
use std::fmt::Display;
use std::panic::Location;

use crate::error::Reportable;
use crate::logging::{self, Diagnostic, Level};
use crate::resp::{ErrorInfo, JsonResponder, ResponseBuilder};

pub fn success<C: JsonResponder, T: Serialize>(ctx: &mut C, data: Option<T>) {
    ResponseBuilder::new().success(ctx, data)
}

pub fn ok<C: JsonResponder>(ctx: &mut C) {
    ResponseBuilder::new().ok(ctx)
}

pub fn internal_error<C: JsonResponder>(ctx: &mut C) -> ResponseBuilder {
    ResponseBuilder::new().internal_error(ctx)
}

pub fn forbidden<C: JsonResponder>(ctx: &mut C) -> ResponseBuilder {
    ResponseBuilder::new().forbidden(ctx)
}

pub fn not_found<C: JsonResponder>(ctx: &mut C) -> ResponseBuilder {
    ResponseBuilder::new().not_found(ctx)
}

pub fn unauthorized<C: JsonResponder>(ctx: &mut C) -> ResponseBuilder {
    ResponseBuilder::new().unauthorized(ctx)
}

pub fn bad_request<C: JsonResponder>(ctx: &mut C) -> ResponseBuilder {
    ResponseBuilder::new().bad_request(ctx)
}

pub fn check_internal_error<C, R>(ctx: &mut C, err: &R) -> bool
where
    C: JsonResponder,
    R: Reportable + ?Sized,
{
    ResponseBuilder::new().check_internal_error(ctx, err)
}

/// Binds `code` to the next error response. Has no effect on a `success`
/// that carries its own payload.
pub fn with_code(code: i64) -> ResponseBuilder {
    ResponseBuilder::new().with_code(code)
}

/// Binds `message` to the next error response. Has no effect on a `success`
/// that carries its own payload.
pub fn with_message<M: Display>(message: M) -> ResponseBuilder {
    ResponseBuilder::new().with_message(message)
}

pub fn with_code_and_message(info: ErrorInfo) -> ResponseBuilder {
    ResponseBuilder::new().with_code_and_message(info)
}

/// Like [`with_message`], and also prints a timestamped diagnostic with the
/// caller's location.
///
/// An absent value (`None`, `Ok(_)`) is not printed and leaves the message
/// unset, so the response falls back to its default classification. This
/// differs on the wire from a formatter that renders nil as `"<nil>"`: such a
/// call writes e.g. `{"code":0,"msg":"Internal Error"}` here, never
/// `{"code":0,"msg":"<nil>"}`.
#[track_caller]
pub fn with_message_log<R: Reportable + ?Sized>(message: &R) -> ResponseBuilder {
    let Some(rendered) = message.render() else {
        return ResponseBuilder::new();
    };
    let diagnostic = Diagnostic::at(Location::caller(), rendered.as_str());
    logging::logger::emit(Level::Error, &diagnostic);
    ResponseBuilder::new().with_message(rendered)
}

/// Print `err` with a timestamp and the caller's location.
#[track_caller]
pub fn log<E: Display>(err: E) -> ResponseBuilder {
    ResponseBuilder::new().log(err)
}
