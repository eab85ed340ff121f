//! Request Inspector
//!
//! A small HTTP server for inspecting what clients actually send. It logs
//! headers, query strings, path parameters, bodies and cookies, and answers
//! every request with a fixed text response.
//!
//! # Routes
//!
//! ```text
//! GET  /test_get/{first_param}/{second_param}   log + set two test cookies
//! POST /test_post                               log body + read the test cookies
//! ```
//!
//! The GET route sets `cookie-name` (HttpOnly) and `cookie-name2` (readable
//! from scripts); replaying them on the POST route shows whether a client
//! kept and resent them.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::InspectorConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
