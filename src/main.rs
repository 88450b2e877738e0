//! Dashboard server
//!
//! Run with: cargo run --bin dashboard
//!
//! # Configuration
//!
//! Settings are read from a TOML file (`--config`, or the default locations),
//! then environment variables, then command-line flags:
//! - `DASHBOARD_HOST` / `--host`: Host to bind to (default: 127.0.0.1)
//! - `DASHBOARD_PORT` / `--port`: Port to listen on (default: 8050)
//! - `DASHBOARD_DEBUG` / `--debug`: Detailed callback errors (default: off)
//! - `DASHBOARD_DATASET` / `--dataset`: CSV to load instead of the bundled sample
//! - `RUST_LOG`: Log filter (overrides the configured level)

use anyhow::Context;
use clap::Parser;
use dashboard::api::{serve_shared, AppState};
use dashboard::config::{generate_default_config, Config, LoggingConfig};
use dashboard::dataset::Dataset;
use dashboard::live::LiveFeed;
use dashboard::websocket::spawn_live_push;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "dashboard", version, about = "Interactive analytics dashboard")]
struct Cli {
    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Show detailed callback errors in the page
    #[arg(long)]
    debug: bool,

    /// CSV dataset to load instead of the bundled sample
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Print a default config file and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.debug {
            config.server.debug = true;
        }
        if let Some(path) = &self.dataset {
            config.dataset.path = Some(path.clone());
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    // a config file that exists but does not parse is fatal
    let (mut config, config_file) = Config::load_from(cli.config.as_deref(), &Config::default_paths())?;
    cli.apply(&mut config);

    init_logging(&config.logging, config.server.debug);

    tracing::info!("Starting dashboard v{}", env!("CARGO_PKG_VERSION"));
    match &config_file {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }
    tracing::info!(
        debug = config.server.debug,
        "Mode: {}",
        if config.server.debug { "debug" } else { "production" }
    );

    // Dataset load failure is fatal
    let source = config.dataset.source();
    let dataset = Dataset::load(&source)
        .with_context(|| format!("Failed to load dataset from {:?}", source))?;
    tracing::info!(
        rows = dataset.len(),
        countries = dataset.countries().len(),
        "Dataset loaded"
    );

    let feed = Arc::new(LiveFeed::new(config.live.feed_config()));
    let state = AppState::new(Arc::new(dataset), Arc::clone(&feed), config.server.clone())
        .context("Bindings do not match the page layout")?;
    let state = Arc::new(state);

    let feed_handle = feed.start();
    let push_handle = spawn_live_push(
        &feed,
        Arc::clone(&state.dispatcher),
        Arc::clone(&state.ws_hub),
    );

    let result = serve_shared(state, &config.server).await;

    feed_handle.abort();
    push_handle.abort();

    result.context("Dashboard server failed")?;
    tracing::info!("Dashboard stopped");
    Ok(())
}

fn init_logging(config: &LoggingConfig, debug: bool) {
    let default_filter = if debug {
        format!("dashboard={},tower_http=debug", config.level)
    } else {
        format!("dashboard={}", config.level)
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
