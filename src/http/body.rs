//! Body parsing stage.
//!
//! Converts the buffered request payload into a [`ParsedBody`] before the
//! POST handler runs. The media type of `Content-Type` selects the parser;
//! anything unrecognised is kept opaque instead of being rejected.

use std::fmt;

use axum::http::{header, HeaderMap};
use serde_json::{Map, Value};

use crate::http::request::decode_pairs;

/// Errors raised while interpreting a request body.
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("text body is not valid UTF-8")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// A request body after the parsing stage.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBody {
    /// No payload bytes.
    Empty,
    /// `application/json` or any `+json` suffix.
    Json(Value),
    /// `application/x-www-form-urlencoded`.
    Form(Map<String, Value>),
    /// `text/*`.
    Text(String),
    /// Anything else; only the size is kept.
    Opaque {
        content_type: Option<String>,
        len: usize,
    },
}

/// Lower-cased media type of a `Content-Type` value, parameters stripped.
fn media_type(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::CONTENT_TYPE)?.to_str().ok()?;
    let essence = value.split(';').next().unwrap_or_default().trim();
    if essence.is_empty() {
        None
    } else {
        Some(essence.to_ascii_lowercase())
    }
}

impl ParsedBody {
    /// Parse `bytes` according to the request's `Content-Type`.
    pub fn parse(headers: &HeaderMap, bytes: &[u8]) -> Result<Self, BodyError> {
        if bytes.is_empty() {
            return Ok(Self::Empty);
        }

        let media = media_type(headers);
        match media.as_deref() {
            Some(m) if m == "application/json" || m.ends_with("+json") => {
                Ok(Self::Json(serde_json::from_slice(bytes)?))
            }
            Some("application/x-www-form-urlencoded") => Ok(Self::Form(decode_pairs(bytes))),
            Some(m) if m.starts_with("text/") => {
                Ok(Self::Text(std::str::from_utf8(bytes)?.to_string()))
            }
            _ => Ok(Self::Opaque {
                content_type: media,
                len: bytes.len(),
            }),
        }
    }
}

impl fmt::Display for ParsedBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("{}"),
            Self::Json(value) => write!(f, "{value}"),
            Self::Form(map) => write!(f, "{}", Value::Object(map.clone())),
            Self::Text(text) => write!(f, "{text:?}"),
            Self::Opaque { content_type, len } => match content_type {
                Some(ct) => write!(f, "<{len} bytes of {ct}>"),
                None => write!(f, "<{len} bytes>"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    fn content_type(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn empty_payload_is_empty_whatever_the_type() {
        let body = ParsedBody::parse(&content_type("application/json"), b"").unwrap();
        assert_eq!(body, ParsedBody::Empty);
        assert_eq!(body.to_string(), "{}");
    }

    #[test]
    fn parses_json_with_parameters() {
        let headers = content_type("Application/JSON; charset=utf-8");
        let body = ParsedBody::parse(&headers, br#"{"x":1}"#).unwrap();
        assert_eq!(body, ParsedBody::Json(json!({"x": 1})));
        assert_eq!(body.to_string(), r#"{"x":1}"#);
    }

    #[test]
    fn parses_json_suffix_types() {
        let headers = content_type("application/vnd.api+json");
        let body = ParsedBody::parse(&headers, b"[1,2]").unwrap();
        assert_eq!(body, ParsedBody::Json(json!([1, 2])));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = ParsedBody::parse(&content_type("application/json"), b"{\"x\":").unwrap_err();
        assert!(matches!(err, BodyError::InvalidJson(_)));
    }

    #[test]
    fn parses_forms() {
        let headers = content_type("application/x-www-form-urlencoded");
        let body = ParsedBody::parse(&headers, b"name=a+b&tag=1&tag=2").unwrap();
        match body {
            ParsedBody::Form(map) => {
                assert_eq!(map["name"], "a b");
                assert_eq!(map["tag"], json!(["1", "2"]));
            }
            other => panic!("expected form, got {other:?}"),
        }
    }

    #[test]
    fn parses_text() {
        let body = ParsedBody::parse(&content_type("text/plain"), b"hello").unwrap();
        assert_eq!(body, ParsedBody::Text("hello".into()));
        assert_eq!(body.to_string(), "\"hello\"");
    }

    #[test]
    fn rejects_invalid_utf8_text() {
        let err = ParsedBody::parse(&content_type("text/plain"), &[0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, BodyError::InvalidUtf8(_)));
    }

    #[test]
    fn unknown_types_stay_opaque() {
        let body = ParsedBody::parse(&content_type("application/octet-stream"), &[1, 2, 3]).unwrap();
        assert_eq!(body.to_string(), "<3 bytes of application/octet-stream>");

        let body = ParsedBody::parse(&HeaderMap::new(), b"abc").unwrap();
        assert_eq!(
            body,
            ParsedBody::Opaque {
                content_type: None,
                len: 3
            }
        );
    }
}
