//! OS signal handling.
//!
//! SIGINT (Ctrl+C) and, on Unix, SIGTERM end the process gracefully: the
//! listener stops accepting and in-flight requests finish.

use tokio::sync::broadcast;

/// Resolve when the process is asked to stop, either by an OS signal or by
/// a message on `trigger`.
pub async fn shutdown_signal(mut trigger: broadcast::Receiver<()>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    // A closed channel means the owner is gone; keep serving until a signal.
    let triggered = async {
        if trigger.recv().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("Shutdown signal received (SIGINT)"),
        _ = terminate => tracing::info!("Shutdown signal received (SIGTERM)"),
        _ = triggered => tracing::info!("Shutdown requested"),
    }
}
