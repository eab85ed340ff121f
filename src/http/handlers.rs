//! Inspection handlers.
//!
//! Each route has a pure handler taking an [`InspectedRequest`] and returning
//! an [`EchoResponse`], plus a thin axum adapter that builds the snapshot
//! from the extracted request parts. Logging for one request is emitted as a
//! single run of events from the handler's task.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::Path,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tower_cookies::Cookie;

use crate::http::body::{BodyError, ParsedBody};
use crate::http::request::InspectedRequest;
use crate::http::response::EchoResponse;

/// Text body returned by both routes.
pub const GREETING: &str = "Hello World";

/// Cookie set with the default attributes.
pub const COOKIE_NAME: &str = "cookie-name";
pub const COOKIE_VALUE: &str = "cookie-value";

/// Cookie set with HttpOnly disabled, readable from scripts.
pub const SCRIPT_COOKIE_NAME: &str = "cookie-name2";
pub const SCRIPT_COOKIE_VALUE: &str = "cookie-value-2";

/// Route pattern of the GET inspection endpoint.
pub const GET_ROUTE: &str = "/test_get/{first_param}/{second_param}";
/// Route of the POST inspection endpoint.
pub const POST_ROUTE: &str = "/test_post";

/// Handler-level failures, rendered as 400 responses.
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error(transparent)]
    Body(#[from] BodyError),
}

impl IntoResponse for InspectError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Rejecting request");
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

/// Separator line opening each request dump.
pub fn banner(kind: &str) -> String {
    format!("==================== REQUEST {kind} ==================")
}

fn object(map: &serde_json::Map<String, Value>) -> Value {
    Value::Object(map.clone())
}

/// Emit the part of the dump shared by both routes.
fn log_common(kind: &str, request: &InspectedRequest) {
    tracing::info!(
        request_id = request.request_id().unwrap_or("unknown"),
        "{}",
        banner(kind)
    );
    tracing::info!(headers = %object(request.headers()), "Headers");
    tracing::info!(query = %object(request.query()), "Query");
    tracing::info!(querystring = %request.querystring(), "QueryString");
    tracing::info!(path = %request.path(), "Path");
    tracing::info!(method = %request.method(), "Method");
}

/// GET `/test_get/{first_param}/{second_param}`: log the request, greet,
/// and set the two test cookies.
pub fn inspect_get(request: &InspectedRequest) -> EchoResponse {
    log_common("GET", request);
    tracing::info!(
        first_param = request.param("first_param").unwrap_or_default(),
        second_param = request.param("second_param").unwrap_or_default(),
        "Params"
    );

    EchoResponse::ok(GREETING)
        .set_cookie(
            Cookie::build((COOKIE_NAME, COOKIE_VALUE))
                .path("/")
                .http_only(true)
                .build(),
        )
        .set_cookie(
            Cookie::build((SCRIPT_COOKIE_NAME, SCRIPT_COOKIE_VALUE))
                .path("/")
                .http_only(false)
                .build(),
        )
}

/// POST `/test_post`: log the request, its parsed body and the two test
/// cookies (absent cookies are logged as `None`), then greet.
pub fn inspect_post(request: &InspectedRequest) -> EchoResponse {
    log_common("POST", request);
    tracing::info!(body = %request.body(), "Body");
    for name in [COOKIE_NAME, SCRIPT_COOKIE_NAME] {
        tracing::info!(cookie = name, value = ?request.cookie(name), "Cookie");
    }

    EchoResponse::ok(GREETING)
}

pub(crate) async fn get_handler(
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path(params): Path<HashMap<String, String>>,
) -> EchoResponse {
    let request = InspectedRequest::new(&method, &uri, &headers).with_params(params);
    inspect_get(&request)
}

pub(crate) async fn post_handler(
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<EchoResponse, InspectError> {
    let body = ParsedBody::parse(&headers, &body)?;
    let request = InspectedRequest::new(&method, &uri, &headers).with_body(body);
    Ok(inspect_post(&request))
}
