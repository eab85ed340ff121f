//! Request snapshots.
//!
//! # Responsibilities
//! - Capture method, path, query, headers, cookies, params and body into an
//!   immutable [`InspectedRequest`] that handlers read from
//!
//! # Design Decisions
//! - Repeated headers and query keys are kept, collapsing into a list
//! - Non-UTF-8 header bytes are replaced lossily; the dump is for humans

use std::collections::BTreeMap;

use axum::http::{header, HeaderMap, Method, Uri};
use serde_json::{Map, Value};
use tower_cookies::Cookie;

use crate::http::body::ParsedBody;

/// Header carrying the request ID, both inbound and outbound.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Insert `value` under `key`, turning the entry into a list on repeats.
pub(crate) fn insert_multi(map: &mut Map<String, Value>, key: String, value: String) {
    match map.get_mut(&key) {
        Some(Value::Array(values)) => values.push(Value::String(value)),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, Value::String(value)]);
        }
        None => {
            map.insert(key, Value::String(value));
        }
    }
}

/// Decode an `application/x-www-form-urlencoded` string into a mapping.
pub(crate) fn decode_pairs(input: &[u8]) -> Map<String, Value> {
    let mut map = Map::new();
    for (key, value) in url::form_urlencoded::parse(input) {
        insert_multi(&mut map, key.into_owned(), value.into_owned());
    }
    map
}

fn headers_to_map(headers: &HeaderMap) -> Map<String, Value> {
    let mut map = Map::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        insert_multi(&mut map, name.as_str().to_string(), value);
    }
    map
}

fn cookies_from_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut cookies = BTreeMap::new();
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        // Values are kept as sent: no percent-decoding, no quote trimming.
        for cookie in Cookie::split_parse(raw).flatten() {
            // First occurrence wins; browsers send the most specific path first.
            cookies
                .entry(cookie.name().to_string())
                .or_insert_with(|| cookie.value().to_string());
        }
    }
    cookies
}

/// Immutable view of one incoming request, as handed to the inspection handlers.
#[derive(Debug, Clone)]
pub struct InspectedRequest {
    method: String,
    path: String,
    querystring: String,
    query: Map<String, Value>,
    headers: Map<String, Value>,
    params: BTreeMap<String, String>,
    body: ParsedBody,
    cookies: BTreeMap<String, String>,
}

impl InspectedRequest {
    /// Snapshot the request line and headers. Params and body start empty.
    pub fn new(method: &Method, uri: &Uri, headers: &HeaderMap) -> Self {
        let querystring = uri.query().unwrap_or_default().to_string();
        Self {
            method: method.as_str().to_string(),
            path: uri.path().to_string(),
            query: decode_pairs(querystring.as_bytes()),
            querystring,
            headers: headers_to_map(headers),
            params: BTreeMap::new(),
            body: ParsedBody::Empty,
            cookies: cookies_from_headers(headers),
        }
    }

    /// Attach the path parameters extracted by the router.
    pub fn with_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Attach the parsed request body.
    pub fn with_body(mut self, body: ParsedBody) -> Self {
        self.body = body;
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw query string without the leading `?`; empty when absent.
    pub fn querystring(&self) -> &str {
        &self.querystring
    }

    pub fn query(&self) -> &Map<String, Value> {
        &self.query
    }

    pub fn headers(&self) -> &Map<String, Value> {
        &self.headers
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn body(&self) -> &ParsedBody {
        &self.body
    }

    /// Value of the named cookie sent by the client, if any.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// The request ID assigned by the middleware stack, if present.
    pub fn request_id(&self) -> Option<&str> {
        self.headers.get(X_REQUEST_ID).and_then(Value::as_str)
    }
}
