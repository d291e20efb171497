//! Binary entrypoint for the Shamba API server.
use anyhow::Result;
use clap::Parser;
use shamba_api::{run, FileConfig, Overrides, ServiceConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(version, about = "Shamba2Shelf traceability QR service")]
struct Args {
    /// Optional TOML configuration file
    #[arg(short, long, env = "SHAMBA_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:8787
    #[arg(short, long, env = "SHAMBA_ADDR")]
    addr: Option<String>,

    /// Public marketplace origin used in QR URLs
    #[arg(short, long, env = "SHAMBA_BASE_URL")]
    base_url: Option<String>,

    /// Log filter, overridden by RUST_LOG when set
    #[arg(long, env = "SHAMBA_LOG")]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let config = ServiceConfig::resolve(
        file,
        Overrides {
            listen_addr: args.addr,
            log_filter: args.log_filter,
            base_url: args.base_url,
        },
    )?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(base_url = config.trace.base_url(), "starting Shamba API");
    run(config).await
}
