//! Response building.
//!
//! Handlers fill an [`EchoResponse`] (status, text body, cookies to set).
//! Cookies become `Set-Cookie` headers in the order they were queued.

use axum::http::{header::SET_COOKIE, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Response};
use tower_cookies::Cookie;

/// Mutable response under construction by an inspection handler.
#[derive(Debug, Clone)]
pub struct EchoResponse {
    status: StatusCode,
    body: String,
    cookies: Vec<Cookie<'static>>,
}

impl EchoResponse {
    /// A 200 response with the given text body and no cookies.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
            cookies: Vec::new(),
        }
    }

    /// Queue a cookie to be sent as a `Set-Cookie` header.
    pub fn set_cookie(mut self, cookie: Cookie<'static>) -> Self {
        self.cookies.push(cookie);
        self
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn cookies(&self) -> &[Cookie<'static>] {
        &self.cookies
    }
}

impl IntoResponse for EchoResponse {
    fn into_response(self) -> Response {
        let set_cookies = self
            .cookies
            .iter()
            .map(|cookie| (SET_COOKIE, cookie.encoded().to_string()))
            .collect::<Vec<_>>();
        (self.status, AppendHeaders(set_cookies), self.body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_cookie_headers(response: &Response) -> Vec<&str> {
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect()
    }

    #[test]
    fn builder_accumulates_cookies_in_order() {
        let response = EchoResponse::ok("body")
            .set_cookie(Cookie::new("a", "1"))
            .set_cookie(Cookie::new("b", "2"));

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.body(), "body");
        let names: Vec<_> = response.cookies().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn set_cookie_headers_keep_queue_order() {
        for _ in 0..8 {
            let response = EchoResponse::ok("")
                .set_cookie(Cookie::new("z", "1"))
                .set_cookie(Cookie::new("a", "2"))
                .set_cookie(Cookie::new("m", "3"))
                .into_response();

            assert_eq!(set_cookie_headers(&response), ["z=1", "a=2", "m=3"]);
        }
    }

    #[test]
    fn cookie_attributes_are_rendered() {
        let cookie = Cookie::build(("name", "value"))
            .path("/")
            .http_only(true)
            .build();
        let response = EchoResponse::ok("").set_cookie(cookie).into_response();

        assert_eq!(
            set_cookie_headers(&response),
            ["name=value; HttpOnly; Path=/"]
        );
    }
}
