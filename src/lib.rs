//! # HTTP Request Error
//!
//! The error value an API client produces when an HTTP request fails.
//!
//! ## Design Philosophy
//!
//! 1. **One error kind**, identified by a fixed name (`"HttpError"`)
//! 2. **Construction never fails**: any status input is coerced, `0` meaning no reply
//! 3. **Credentials are redacted** before the error can reach a log or a crash report
//! 4. **The caller's request is never mutated**; the error holds a redacted copy
//! 5. **Absence of a response is a type**, not a null
//!
//! ## What Gets Redacted
//!
//! - `authorization` request header: `"token secret123"` -> `"token [REDACTED]"`
//! - `client_secret=..` and `access_token=..` in the request URL
//!
//! Request bodies, other headers and responses are passed through as-is.
//!
//! ## Quick Start
//!
//! ```rust
//! use http_request_error::{ErrorContext, Method, RequestDescriptor, RequestError};
//!
//! let request = RequestDescriptor::new(Method::Post, "https://api.github.com/authorizations")
//!     .with_header("authorization", "token secret123");
//!
//! let ctx = ErrorContext::without_response(request);
//! let err = RequestError::new("connect ETIMEDOUT", "not a number", &ctx);
//!
//! assert_eq!(err.name(), "HttpError");
//! assert_eq!(err.status(), 0);
//! assert!(!err.has_response());
//! assert_eq!(err.request().headers.get("authorization"), Some("token [REDACTED]"));
//!
//! // The client's own request is untouched.
//! assert_eq!(ctx.request().headers.get("authorization"), Some("token secret123"));
//! ```
//!
//! ## Logging
//!
//! ```rust
//! # use http_request_error::{ErrorContext, Method, RequestDescriptor, RequestError};
//! # let ctx = ErrorContext::without_response(RequestDescriptor::new(Method::Get, "/"));
//! let err = RequestError::new("Server Error", 502, &ctx);
//! err.with_log_record(|log| {
//!     // logger.error(log.to_string());
//!     assert!(log.to_string().starts_with("[HttpError] status=502"));
//! });
//! ```
//!
//! ## Features
//!
//! - `trusted_debug`: Enable `ErrorLog::format_for_trusted_debug` (debug builds only)

#![warn(missing_docs)]
#![warn(clippy::all)]

use serde::Serialize;
use std::fmt;
use std::result;
use std::sync::Arc;

pub mod logging;
pub mod models;
pub mod redaction;
pub mod status;

pub use logging::*;
pub use models::*;
pub use redaction::*;
pub use status::*;

/// Type alias for Results using our error type.
pub type Result<T> = result::Result<T, RequestError>;

/// Error produced when an HTTP request fails.
///
/// # Key Properties
///
/// - Immutable once built: fields are private, accessors are read-only
/// - `request` is a redacted copy; the caller's request is never touched
/// - `response` is shared with the caller by `Arc`, never copied
/// - Not `Clone`: each failure has exactly one owner
///
/// # Serialization
///
/// Serializes to `{ name, message, status, request, response? }`. The
/// `response` key is omitted entirely when no reply was received.
#[must_use = "errors should be handled or logged"]
#[derive(Serialize)]
pub struct RequestError {
    name: &'static str,
    message: String,
    status: u32,
    request: RequestDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<Arc<ResponseDescriptor>>,
}

impl RequestError {
    /// Fixed name identifying this error kind.
    pub const NAME: &'static str = "HttpError";

    /// Build an error from a failed request.
    ///
    /// - `status` accepts anything convertible to [`StatusInput`]; unusable
    ///   input becomes `0` (see [`coerce_status`])
    /// - the response, if any, is attached by reference
    /// - the request is copied and redacted (see [`redact_request`])
    ///
    /// Never fails, never panics, performs no I/O and no logging.
    ///
    /// ```rust
    /// use http_request_error::{ErrorContext, Method, RequestDescriptor, RequestError, ResponseDescriptor};
    /// use serde_json::json;
    ///
    /// let request = RequestDescriptor::new(Method::Get, "https://api.github.com/?access_token=secret123");
    /// let response = ResponseDescriptor::new("https://api.github.com/", 404, json!({ "error": "Not Found" }));
    /// let err = RequestError::new("Not Found", "404", &ErrorContext::with_response(request, response));
    ///
    /// assert_eq!(err.status(), 404);
    /// assert_eq!(err.request().url, "https://api.github.com/?access_token=[REDACTED]");
    /// assert_eq!(err.response().map(|r| r.status), Some(404));
    /// ```
    pub fn new(
        message: impl Into<String>,
        status: impl Into<StatusInput>,
        context: &ErrorContext,
    ) -> Self {
        Self {
            name: Self::NAME,
            message: message.into(),
            status: coerce_status(status),
            request: redact_request(context.request()),
            response: context.response().cloned(),
        }
    }

    /// Fixed name identifying this error kind. Always [`RequestError::NAME`].
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The message, exactly as given.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Coerced status. `0` means no usable HTTP status.
    #[inline]
    pub const fn status(&self) -> u32 {
        self.status
    }

    /// Coarse status classification for branching.
    #[inline]
    pub const fn class(&self) -> StatusClass {
        StatusClass::of(self.status)
    }

    /// Redacted copy of the request that failed.
    #[inline]
    pub const fn request(&self) -> &RequestDescriptor {
        &self.request
    }

    /// The received reply, if any.
    #[inline]
    pub fn response(&self) -> Option<&ResponseDescriptor> {
        self.response.as_deref()
    }

    /// The received reply as the shared handle supplied by the caller.
    #[inline]
    pub fn response_handle(&self) -> Option<&Arc<ResponseDescriptor>> {
        self.response.as_ref()
    }

    /// Whether a reply was received.
    #[inline]
    pub const fn has_response(&self) -> bool {
        self.response.is_some()
    }

    /// Structured log record borrowing from this error.
    ///
    /// The record cannot outlive the error and contains only redacted
    /// request data.
    #[inline]
    pub fn log_record(&self) -> ErrorLog<'_> {
        ErrorLog {
            name: self.name,
            message: &self.message,
            status: self.status,
            request: &self.request,
            response_status: self.response.as_ref().map(|r| r.status),
        }
    }

    /// Callback-style access to the log record.
    #[inline]
    pub fn with_log_record<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ErrorLog<'_>) -> R,
    {
        let log = self.log_record();
        f(&log)
    }
}

impl fmt::Debug for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestError")
            .field("name", &self.name)
            .field("message", &self.message)
            .field("status", &self.status)
            .field("method", &self.request.method)
            .field("url", &self.request.url)
            .field("headers", &self.request.headers)
            .field("body", &self.request.body.as_ref().map(|_| "<PRESENT>"))
            .field("response", &self.response.as_ref().map(|r| r.status))
            .finish()
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RequestError {}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> ErrorContext {
        ErrorContext::without_response(RequestDescriptor::new(
            Method::Get,
            "https://api.github.com/",
        ))
    }

    #[test]
    fn name_is_fixed() {
        let err = RequestError::new("test", 123, &ctx());
        assert_eq!(err.name(), "HttpError");
        assert_eq!(err.name(), RequestError::NAME);
    }

    #[test]
    fn message_round_trips() {
        assert_eq!(RequestError::new("test", 123, &ctx()).message(), "test");
        assert_eq!(RequestError::new("foo", 123, &ctx()).message(), "foo");
        assert_eq!(RequestError::new("", 123, &ctx()).message(), "");
    }

    #[test]
    fn display_is_message() {
        let err = RequestError::new("Bad credentials", 401, &ctx());
        assert_eq!(err.to_string(), "Bad credentials");
    }

    #[test]
    fn usable_as_boxed_std_error() {
        fn fail() -> result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Err(RequestError::new("boom", 500, &ctx()).into())
        }
        let err = fail().unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert!(err.downcast_ref::<RequestError>().is_some());
    }

    #[test]
    fn status_coerced() {
        assert_eq!(RequestError::new("t", 404, &ctx()).status(), 404);
        assert_eq!(RequestError::new("t", "404", &ctx()).status(), 404);
        assert_eq!(RequestError::new("t", f64::NAN, &ctx()).status(), 0);
        assert_eq!(RequestError::new("t", json!([]), &ctx()).status(), 0);
    }

    #[test]
    fn class_follows_status() {
        assert_eq!(RequestError::new("t", 0, &ctx()).class(), StatusClass::NoResponse);
        assert_eq!(RequestError::new("t", 503, &ctx()).class(), StatusClass::Server);
    }

    #[test]
    fn no_response_is_absent() {
        let err = RequestError::new("t", 0, &ctx());
        assert!(!err.has_response());
        assert!(err.response().is_none());

        let value = serde_json::to_value(&err).unwrap();
        assert!(value.get("response").is_none());
    }

    #[test]
    fn response_is_shared() {
        let response = Arc::new(ResponseDescriptor::new("https://api.github.com/", 500, json!(null)));
        let context = ErrorContext::with_response(
            RequestDescriptor::new(Method::Get, "https://api.github.com/"),
            Arc::clone(&response),
        );
        let err = RequestError::new("t", 500, &context);

        let handle = err.response_handle().unwrap();
        assert!(Arc::ptr_eq(handle, &response));
    }

    #[test]
    fn debug_hides_body() {
        let context = ErrorContext::without_response(
            RequestDescriptor::new(Method::Post, "/x").with_body(json!({ "password": "hunter2" })),
        );
        let err = RequestError::new("t", 400, &context);
        let debug = format!("{:?}", err);

        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<PRESENT>"));
    }

    #[test]
    fn serializes_all_fields() {
        let context = ErrorContext::without_response(
            RequestDescriptor::new(Method::Get, "/user").with_header("authorization", "token abc"),
        );
        let err = RequestError::new("Requires authentication", 401, &context);

        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({
                "name": "HttpError",
                "message": "Requires authentication",
                "status": 401,
                "request": {
                    "method": "GET",
                    "url": "/user",
                    "headers": { "authorization": "token [REDACTED]" }
                }
            })
        );
    }

    #[test]
    fn log_record_reflects_error() {
        let context = ErrorContext::with_response(
            RequestDescriptor::new(Method::Get, "/repos/o/r"),
            ResponseDescriptor::new("/repos/o/r", 404, json!({ "message": "Not Found" })),
        );
        let err = RequestError::new("Not Found", 404, &context);

        err.with_log_record(|log| {
            assert_eq!(log.name(), "HttpError");
            assert_eq!(log.status(), 404);
            assert_eq!(log.response_status(), Some(404));
            assert_eq!(log.url(), "/repos/o/r");
        });
    }
}
