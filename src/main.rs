use std::path::PathBuf;

use clap::Parser;

use request_inspector::config::ObservabilityConfig;
use request_inspector::lifecycle::{bind_listener, resolve_config, Shutdown, StartupError};
use request_inspector::observability::logging;
use request_inspector::HttpServer;

#[derive(Parser)]
#[command(name = "request-inspector")]
#[command(about = "HTTP server that logs incoming requests and sets test cookies", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen address (e.g. 127.0.0.1:3000).
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match resolve_config(cli.config.as_deref(), cli.bind.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // No usable logging settings yet; report with the defaults.
            logging::init(&ObservabilityConfig::default());
            e.log();
            return Err(e.into());
        }
    };
    logging::init(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "request-inspector starting"
    );

    let listener = bind_listener(&config).await.inspect_err(StartupError::log)?;

    // Only OS signals stop the binary; the handle keeps the channel open.
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
