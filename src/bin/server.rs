use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use pricewatch::{
    api::{ApiConfig, ApiState, spawn_api_server},
    config::{Config, read_config_file},
    feeds::HermesClient,
    registry::SessionRegistry,
};
use tracing::{info, level_filters::LevelFilter, trace};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Parser)]
struct Args {
    /// Config file (optional; defaults and environment variables apply otherwise)
    #[arg(short)]
    file: Option<String>,
}

fn init() {
    let filter = filter::Targets::new().with_targets(vec![
        ("pricewatch", LevelFilter::TRACE),
        ("pricewatch_server", LevelFilter::TRACE),
    ]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init();

    let args = Args::parse();
    trace!("started with args: {args:?}");

    let config = match &args.file {
        Some(path) => read_config_file(path)?,
        None => Config::default(),
    };

    let bind_addr: SocketAddr = format!("{}:{}", config.addr, config.port).parse()?;

    let feed = HermesClient::with_timeout(
        config.hermes_url.clone(),
        Duration::from_secs(config.fetch_timeout_secs),
    );
    let registry = Arc::new(SessionRegistry::new(feed.clone()));
    let state = ApiState::new(registry, feed, config.default_interval_secs);

    let api_config = ApiConfig {
        bind_addr,
        enable_cors: true,
    };

    let addr = spawn_api_server(api_config, state).await?;

    info!("price monitor ready at http://{addr} (feed: {})", config.hermes_url);

    tokio::signal::ctrl_c().await?;
    info!("shutting down");

    Ok(())
}
