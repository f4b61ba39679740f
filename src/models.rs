//! Request and response descriptors supplied by the HTTP client at failure time.
//!
//! # Ownership Model
//!
//! The HTTP client owns its `RequestDescriptor` and keeps using it after the
//! error is built (for retries, logging, rate-limit bookkeeping). Error
//! construction therefore only ever *borrows* the context:
//!
//! - `Headers` are cloned into the error before any field is rewritten
//! - Request bodies are opaque and shared through `Arc<Body>`
//! - Responses are shared through `Arc<ResponseDescriptor>`, never copied
//!
//! `ErrorContext` is a sum type. A failure either happened before any reply
//! arrived (`NoResponse`) or after one was received (`WithResponse`); there is
//! no nullable response field to forget to check.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Opaque request/response payload. Never interpreted, never redacted.
pub type Body = serde_json::Value;

// ============================================================================
// Method
// ============================================================================

/// HTTP method of the attempted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// `DELETE`
    Delete,
    /// `GET`
    Get,
    /// `HEAD`
    Head,
    /// `PATCH`
    Patch,
    /// `POST`
    Post,
    /// `PUT`
    Put,
}

impl Method {
    /// Upper-case verb as sent on the wire.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => "DELETE",
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Patch => "PATCH",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `Method::from_str` for verbs outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(String);

impl UnknownMethod {
    /// The rejected verb, as given.
    #[inline]
    pub fn verb(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported HTTP method '{}'", self.0)
    }
}

impl std::error::Error for UnknownMethod {}

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: [Method; 6] = [
            Method::Delete,
            Method::Get,
            Method::Head,
            Method::Patch,
            Method::Post,
            Method::Put,
        ];
        ALL.into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

// ============================================================================
// Headers
// ============================================================================

/// Header map keyed by lower-cased name.
///
/// Requests rarely carry more than a handful of headers, so entries live
/// inline in a `SmallVec` and spill to the heap only for unusual requests.
/// Equality ignores insertion order.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    entries: SmallVec<[(String, String); 8]>,
}

impl Headers {
    /// Create an empty header map.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Insert a header, lower-casing its name. Replaces any existing value.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        let name = name.as_ref().to_ascii_lowercase();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Look up a header by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut String> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Whether a header with this name is present.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of headers.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Headers {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for Headers {}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

impl Serialize for Headers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ============================================================================
// Request / Response Descriptors
// ============================================================================

/// The HTTP request that was attempted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    /// Request method.
    pub method: Method,
    /// Absolute or relative URL, e.g. `/orgs/:org` or `https://example.com/foo`.
    pub url: String,
    /// Every header the client actually sent, including `authorization`.
    pub headers: Headers,
    /// Optional opaque payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Arc<Body>>,
}

impl RequestDescriptor {
    /// Describe a request with no headers and no body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    /// Add a header (builder style).
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Attach a body (builder style).
    pub fn with_body(mut self, body: impl Into<Arc<Body>>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// A reply received over the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseDescriptor {
    /// Final URL of the response (after redirects).
    pub url: String,
    /// HTTP status of the reply.
    pub status: u16,
    /// Response headers.
    pub headers: Headers,
    /// Opaque response payload.
    pub data: Body,
}

impl ResponseDescriptor {
    /// Describe a response with no headers.
    pub fn new(url: impl Into<String>, status: u16, data: Body) -> Self {
        Self {
            url: url.into(),
            status,
            headers: Headers::new(),
            data,
        }
    }

    /// Add a header (builder style).
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

// ============================================================================
// Error Context
// ============================================================================

/// Request-always, response-maybe bundle supplied when a request fails.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorContext {
    /// The request failed before any reply arrived (network error, timeout, abort).
    NoResponse {
        /// The attempted request.
        request: RequestDescriptor,
    },
    /// A reply was received (typically a non-2xx status).
    WithResponse {
        /// The attempted request.
        request: RequestDescriptor,
        /// The received reply.
        response: Arc<ResponseDescriptor>,
    },
}

impl ErrorContext {
    /// Context for a failure with no reply.
    #[inline]
    pub fn without_response(request: RequestDescriptor) -> Self {
        Self::NoResponse { request }
    }

    /// Context for a failure where a reply was received.
    #[inline]
    pub fn with_response(
        request: RequestDescriptor,
        response: impl Into<Arc<ResponseDescriptor>>,
    ) -> Self {
        Self::WithResponse {
            request,
            response: response.into(),
        }
    }

    /// The attempted request.
    #[inline]
    pub fn request(&self) -> &RequestDescriptor {
        match self {
            Self::NoResponse { request } | Self::WithResponse { request, .. } => request,
        }
    }

    /// The shared response, if one was received.
    #[inline]
    pub fn response(&self) -> Option<&Arc<ResponseDescriptor>> {
        match self {
            Self::NoResponse { .. } => None,
            Self::WithResponse { response, .. } => Some(response),
        }
    }
}
