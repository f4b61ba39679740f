//! Structured log record for failed requests.
//!
//! # Properties
//!
//! - Borrows from `RequestError` with an explicit lifetime
//! - CANNOT outlive the error that created it
//! - Carries only redacted request data
//! - Free-text fields are bounded when written out
//!
//! Building an error never logs anything. Callers that want a log line ask
//! for an `ErrorLog` and hand it to their own logger.

use crate::models::{Method, RequestDescriptor};
use crate::status::StatusClass;
use std::borrow::Cow;
use std::fmt;

/// Maximum length for any individual field in formatted output (DoS prevention)
const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Truncation indicator appended to truncated strings
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Structured log record borrowed from a `RequestError`.
///
/// # Example
///
/// ```rust
/// # use http_request_error::{ErrorContext, Method, RequestDescriptor, RequestError};
/// let request = RequestDescriptor::new(Method::Get, "/user?access_token=abc");
/// let err = RequestError::new("Bad credentials", 401, &ErrorContext::without_response(request));
///
/// let mut line = String::new();
/// err.log_record().write_to(&mut line).unwrap();
/// assert!(line.contains("access_token=[REDACTED]"));
/// assert!(line.contains("class=authentication"));
/// ```
#[derive(Clone, Copy)]
pub struct ErrorLog<'a> {
    pub(crate) name: &'static str,
    pub(crate) message: &'a str,
    pub(crate) status: u32,
    pub(crate) request: &'a RequestDescriptor,
    pub(crate) response_status: Option<u16>,
}

impl<'a> ErrorLog<'a> {
    /// Format for human-readable logs in trusted debug contexts.
    ///
    /// WARNING: unlike `write_to`, this includes every request header and the
    /// request body, neither of which is redacted beyond `authorization`.
    /// Only available with BOTH the `trusted_debug` feature AND debug
    /// assertions enabled.
    #[cfg(all(feature = "trusted_debug", debug_assertions))]
    pub fn format_for_trusted_debug(&self) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut output);

        for (name, value) in self.request.headers.iter() {
            output.push_str(&format!(
                " header.{}='{}'",
                name,
                truncate_with_indicator(value)
            ));
        }

        if let Some(body) = &self.request.body {
            output.push_str(&format!(
                " body='{}'",
                truncate_with_indicator(&body.to_string())
            ));
        }

        output
    }

    /// Write a single log line to a formatter.
    ///
    /// Format:
    /// `[HttpError] status=404 class=not_found method=GET url='..' message='..' response_status=404`
    ///
    /// `response_status` is omitted when no reply was received. The URL and
    /// message are truncated to bound the output size.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "[{}] status={} class={} method={} url='{}' message='{}'",
            self.name,
            self.status,
            self.class().display_name(),
            self.request.method,
            truncate_with_indicator(&self.request.url),
            truncate_with_indicator(self.message)
        )?;

        if let Some(status) = self.response_status {
            write!(f, " response_status={}", status)?;
        }

        Ok(())
    }

    /// Fixed error-kind name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Error message, untruncated.
    #[inline]
    pub const fn message(&self) -> &str {
        self.message
    }

    /// Coerced status.
    #[inline]
    pub const fn status(&self) -> u32 {
        self.status
    }

    /// Classification of the status.
    #[inline]
    pub const fn class(&self) -> StatusClass {
        StatusClass::of(self.status)
    }

    /// Request method.
    #[inline]
    pub const fn method(&self) -> Method {
        self.request.method
    }

    /// Redacted request URL, untruncated.
    #[inline]
    pub fn url(&self) -> &str {
        &self.request.url
    }

    /// Status of the received reply, if any.
    #[inline]
    pub const fn response_status(&self) -> Option<u16> {
        self.response_status
    }
}

impl fmt::Debug for ErrorLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorLog")
            .field("name", &self.name)
            .field("status", &self.status)
            .field("method", &self.request.method)
            .field("url", &self.request.url)
            .field("message", &self.message)
            .field("response_status", &self.response_status)
            .finish()
    }
}

impl fmt::Display for ErrorLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Truncate a string for display to prevent DoS via extremely long fields.
///
/// Returns a Cow<str> to avoid allocation when no truncation is needed.
fn truncate_with_indicator(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(s);
    }

    let max_content_len = MAX_FIELD_OUTPUT_LEN.saturating_sub(TRUNCATION_INDICATOR.len());

    // Last char boundary at or before the limit
    let mut idx = max_content_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    if idx == 0 {
        return Cow::Borrowed(TRUNCATION_INDICATOR);
    }

    let mut result = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    result.push_str(&s[..idx]);
    result.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(result)
}
