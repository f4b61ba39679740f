//! Status coercion - turns whatever the caller passed as a status into a `u32`.
//!
//! HTTP clients hand us a status from many places: a parsed `u16`, a header
//! string, a JSON field, or nothing usable at all when the transport failed
//! before a reply arrived. Coercion is total: every input maps to a number,
//! and `0` means "no usable HTTP status".
//!
//! | Input                     | Status |
//! |---------------------------|--------|
//! | `404`                     | 404    |
//! | `"404"`, `" 404 Not Found"` | 404  |
//! | `"0x1F"`                  | 31     |
//! | `f64::NAN`, `"abc"`, `""` | 0      |
//! | lists, dates, objects     | 0      |
//! | negative or > `u32::MAX`  | 0      |
//!
//! No range validation is performed: `123` or `999` are kept as given.

use std::time::SystemTime;

/// Loosely-typed status as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusInput {
    /// An integer status.
    Integer(i64),
    /// A floating-point status; truncated toward zero.
    Float(f64),
    /// A textual status; its leading integer is parsed.
    Text(String),
    /// Any non-numeric value (list, date, object, boolean, null, missing).
    Opaque,
}

impl StatusInput {
    /// Collapse this input to a status. Never fails.
    pub fn coerce(&self) -> u32 {
        match self {
            Self::Integer(n) => from_integer(*n),
            Self::Float(f) => from_float(*f),
            Self::Text(s) => parse_leading_integer(s).map_or(0, from_integer),
            Self::Opaque => 0,
        }
    }
}

/// Coerce any status-like value to a `u32`, with `0` for unusable input.
///
/// ```rust
/// use http_request_error::coerce_status;
///
/// assert_eq!(coerce_status(404), 404);
/// assert_eq!(coerce_status("404"), 404);
/// assert_eq!(coerce_status(f64::NAN), 0);
/// assert_eq!(coerce_status(serde_json::json!([])), 0);
/// ```
#[inline]
pub fn coerce_status(input: impl Into<StatusInput>) -> u32 {
    input.into().coerce()
}

#[inline]
fn from_integer(n: i64) -> u32 {
    u32::try_from(n).unwrap_or(0)
}

fn from_float(f: f64) -> u32 {
    if !f.is_finite() {
        return 0;
    }
    let truncated = f.trunc();
    if truncated < 0.0 || truncated > f64::from(u32::MAX) {
        0
    } else {
        truncated as u32
    }
}

/// Parse the leading integer of `text`, ignoring anything after the digits.
///
/// Accepts leading whitespace, an optional sign and an optional `0x`/`0X`
/// prefix. Returns `None` when no digit follows. Magnitudes saturate.
fn parse_leading_integer(text: &str) -> Option<i64> {
    let mut rest = text.trim_start();

    let negative = match rest.as_bytes().first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let radix = match rest.get(..2) {
        Some("0x") | Some("0X") => {
            rest = &rest[2..];
            16
        }
        _ => 10,
    };

    let mut magnitude: i64 = 0;
    let mut saw_digit = false;
    for c in rest.chars() {
        let Some(digit) = c.to_digit(radix) else {
            break;
        };
        saw_digit = true;
        magnitude = magnitude
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(digit));
    }

    if !saw_digit {
        return None;
    }
    Some(if negative { -magnitude } else { magnitude })
}

// ============================================================================
// Conversions
// ============================================================================

macro_rules! impl_from_lossless_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for StatusInput {
                #[inline]
                fn from(n: $t) -> Self {
                    Self::Integer(i64::from(n))
                }
            }
        )*
    };
}

impl_from_lossless_int!(u8, u16, u32, i8, i16, i32, i64);

macro_rules! impl_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for StatusInput {
                #[inline]
                fn from(n: $t) -> Self {
                    Self::Integer(i64::try_from(n).unwrap_or(i64::MAX))
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, isize);

impl From<f64> for StatusInput {
    #[inline]
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<f32> for StatusInput {
    #[inline]
    fn from(f: f32) -> Self {
        Self::Float(f64::from(f))
    }
}

impl From<&str> for StatusInput {
    #[inline]
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for StatusInput {
    #[inline]
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for StatusInput {
    #[inline]
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<SystemTime> for StatusInput {
    #[inline]
    fn from(_: SystemTime) -> Self {
        Self::Opaque
    }
}

impl<T: Into<StatusInput>> From<Option<T>> for StatusInput {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Opaque, Into::into)
    }
}

impl From<&serde_json::Value> for StatusInput {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Self::from(u)
                } else {
                    n.as_f64().map_or(Self::Opaque, Self::Float)
                }
            }
            Value::String(s) => Self::Text(s.clone()),
            Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => Self::Opaque,
        }
    }
}

impl From<serde_json::Value> for StatusInput {
    #[inline]
    fn from(value: serde_json::Value) -> Self {
        Self::from(&value)
    }
}

// ============================================================================
// Status Classification
// ============================================================================

/// Coarse classification consumers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    /// Status `0`: network failure, timeout or abort; no reply.
    NoResponse,
    /// `401` or `403`.
    Authentication,
    /// `404`.
    NotFound,
    /// Any other `4xx`.
    Client,
    /// `500` and above.
    Server,
    /// Anything else (`1xx`-`3xx`, or a non-HTTP value below 400).
    Unexpected,
}

impl StatusClass {
    /// Classify a coerced status.
    pub const fn of(status: u32) -> Self {
        match status {
            0 => Self::NoResponse,
            401 | 403 => Self::Authentication,
            404 => Self::NotFound,
            400..=499 => Self::Client,
            500..=u32::MAX => Self::Server,
            _ => Self::Unexpected,
        }
    }

    /// Static label for logs.
    #[inline]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::NoResponse => "no_response",
            Self::Authentication => "authentication",
            Self::NotFound => "not_found",
            Self::Client => "client",
            Self::Server => "server",
            Self::Unexpected => "unexpected",
        }
    }
}
