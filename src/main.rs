//! SIMOKA gateway: main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                    │
//! │   axum router (http)   LogEventSink   JsonConfigFile     │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ─────────────────   │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │         MonitorService (pure logic)                │  │
//! │  │  Registry · Processor · Classifier                 │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use simoka::adapters::config_file::JsonConfigFile;
use simoka::adapters::http;
use simoka::app::ports::ConfigPort;
use simoka::app::service::MonitorService;

#[derive(Parser, Debug)]
#[command(name = "simoka")]
#[command(about = "Water-quality status gateway")]
struct Cli {
    /// JSON configuration file (defaults are used if it does not exist)
    #[arg(long, env = "SIMOKA_CONFIG", default_value = "simoka.json")]
    config: PathBuf,

    /// Override the configured listen address
    #[arg(long, env = "SIMOKA_BIND")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "simoka=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = JsonConfigFile::new(&cli.config)
        .load()
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }

    let service = Arc::new(MonitorService::from_config(&config).context("building monitor")?);
    let app = http::router(service);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for ctrl-c: {e}");
    }
}
