//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve configuration (file or defaults, then command-line overrides)
//! - Validate before anything binds
//! - Bind the listener last
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal

use std::path::Path;

use tokio::net::TcpListener;

use crate::config::{read_config, validate_config, ConfigError, InspectorConfig};

/// Errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

impl StartupError {
    /// Report this error as the fatal startup event.
    pub fn log(&self) {
        match self {
            Self::Config(ConfigError::Validation(errors)) => {
                for error in errors {
                    tracing::error!(error = %error, "Invalid configuration");
                }
            }
            Self::Config(error) => tracing::error!(error = %error, "Invalid configuration"),
            Self::Bind { address, source } => {
                tracing::error!(address = %address, error = %source, "Failed to bind listener")
            }
        }
    }
}

/// Load the configuration file if one is given, apply a bind override and
/// validate the result.
pub fn resolve_config(
    path: Option<&Path>,
    bind_override: Option<&str>,
) -> Result<InspectorConfig, StartupError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => InspectorConfig::default(),
    };

    if let Some(address) = bind_override {
        config.listener.bind_address = address.to_string();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Bind the TCP listener described by `config.listener`.
pub async fn bind_listener(config: &InspectorConfig) -> Result<TcpListener, StartupError> {
    let address = &config.listener.bind_address;
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    if let Ok(local) = listener.local_addr() {
        tracing::info!(address = %local, "Listening for connections");
    }
    Ok(listener)
}
