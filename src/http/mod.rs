//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (InspectedRequest snapshot)
//!     → body.rs (POST only: buffer and parse payload)
//!     → handlers.rs (log the dump, build EchoResponse)
//!     → response.rs (ordered Set-Cookie headers, text body)
//!     → Send to client
//! ```

pub mod body;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use body::{BodyError, ParsedBody};
pub use handlers::{inspect_get, inspect_post, InspectError};
pub use request::{InspectedRequest, X_REQUEST_ID};
pub use response::EchoResponse;
pub use server::{build_router, HttpServer};
