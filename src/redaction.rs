//! Credential redaction for failed-request diagnostics.
//!
//! Two leak vectors are covered, both on the request side:
//!
//! 1. The `authorization` header: everything after the scheme is replaced,
//!    `"token secret123"` becomes `"token [REDACTED]"`. A bare token with no
//!    scheme is replaced entirely.
//! 2. URL query parameters: every `client_secret=<word>` and
//!    `access_token=<word>` occurrence becomes `<name>=[REDACTED]`.
//!
//! Request bodies, other headers and responses are NOT inspected.
//!
//! # Non-mutation
//!
//! Redaction works on a copy. The caller's `RequestDescriptor` is only ever
//! borrowed; the copied authorization secret is zeroized once it has been
//! replaced so the plaintext does not linger in freed heap memory.

use crate::models::RequestDescriptor;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use zeroize::Zeroize;

/// Marker substituted for removed credentials.
pub const REDACTED: &str = "[REDACTED]";

static CLIENT_SECRET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)client_secret=[A-Za-z0-9_]+").expect("client_secret regex")
});

static ACCESS_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)access_token=[A-Za-z0-9_]+").expect("access_token regex")
});

/// Redact the credential part of an `authorization` header value.
///
/// ```rust
/// use http_request_error::redact_authorization;
///
/// assert_eq!(redact_authorization("token secret123"), "token [REDACTED]");
/// assert_eq!(redact_authorization("Bearer a b c"), "Bearer [REDACTED]");
/// assert_eq!(redact_authorization("secret123"), "[REDACTED]");
/// assert_eq!(redact_authorization(""), "");
/// ```
pub fn redact_authorization(value: &str) -> Cow<'_, str> {
    if value.is_empty() {
        return Cow::Borrowed(value);
    }
    match value.find(' ') {
        Some(idx) => {
            let mut out = String::with_capacity(idx + 1 + REDACTED.len());
            out.push_str(&value[..idx]);
            out.push(' ');
            out.push_str(REDACTED);
            Cow::Owned(out)
        }
        None => Cow::Borrowed(REDACTED),
    }
}

/// Redact `client_secret` and `access_token` query parameters in a URL.
///
/// Every occurrence is replaced. The parameter name must start at a word
/// boundary, so `fake_client_secret=x` is left alone. Returns the input
/// unchanged (borrowed) when nothing matches.
///
/// ```rust
/// use http_request_error::redact_url;
///
/// assert_eq!(
///     redact_url("https://api.github.com/?client_id=123&client_secret=secret123"),
///     "https://api.github.com/?client_id=123&client_secret=[REDACTED]",
/// );
/// ```
pub fn redact_url(url: &str) -> Cow<'_, str> {
    match CLIENT_SECRET.replace_all(url, "client_secret=[REDACTED]") {
        Cow::Borrowed(unchanged) => ACCESS_TOKEN.replace_all(unchanged, "access_token=[REDACTED]"),
        Cow::Owned(partial) => Cow::Owned(
            ACCESS_TOKEN
                .replace_all(&partial, "access_token=[REDACTED]")
                .into_owned(),
        ),
    }
}

/// Produce a redacted copy of `request`. The original is left untouched.
///
/// The headers map is cloned before `authorization` is rewritten; the body
/// `Arc` is shared, not copied.
pub fn redact_request(request: &RequestDescriptor) -> RequestDescriptor {
    let mut copy = request.clone();

    if let Some(value) = copy.headers.get_mut("authorization") {
        if !value.is_empty() {
            let redacted = redact_authorization(value.as_str()).into_owned();
            let mut secret = std::mem::replace(value, redacted);
            secret.zeroize();
        }
    }

    if let Cow::Owned(url) = redact_url(&request.url) {
        copy.url = url;
    }

    copy
}
