//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with both inspection routes
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Serve on a bound listener until shutdown

use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::Span;

use crate::config::InspectorConfig;
use crate::http::handlers::{get_handler, post_handler, GET_ROUTE, POST_ROUTE};
use crate::http::request::X_REQUEST_ID;
use crate::lifecycle::signals::shutdown_signal;

/// HTTP server exposing the inspection routes.
pub struct HttpServer {
    router: Router,
    config: InspectorConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: InspectorConfig) -> Self {
        let router = build_router(&config);
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener until
    /// SIGINT/SIGTERM or a message on `shutdown`.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
            max_body_size = self.config.limits.max_body_size,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Span wrapping one request; carries the id set by `SetRequestIdLayer`.
fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
    )
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &InspectorConfig) -> Router {
    Router::new()
        .route(GET_ROUTE, get(get_handler))
        .route(POST_ROUTE, post(post_handler))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.limits.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}
