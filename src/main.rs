//! Weather Tracker server
//!
//! Run with: cargo run --bin weather-tracker
//!
//! Configuration is read from the standard locations (see
//! [`Config::load_default`]) with `WEATHER_*` environment overrides.
//! `RUST_LOG` takes precedence over the configured log level.

use anyhow::Context;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use weather_tracker::api::{serve, AppState};
use weather_tracker::config::{Config, LoggingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    init_tracing(&config.logging)?;

    tracing::info!("Starting Weather Tracker v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Region boundaries: {:?}", config.regions.path);
    tracing::info!(
        seed = config.series.seed,
        samples = config.series.sample_count,
        "Series generator configured"
    );

    if !config.regions.path.is_file() {
        tracing::warn!(
            "Region file {:?} not found; the map page will report it as unavailable",
            config.regions.path
        );
    }

    serve(AppState::new(config)).await?;
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("weather_tracker={},tower_http=info", logging.level))
    });

    let writer = match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stdout),
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(logging.file.is_none());
    let layer = match logging.format.as_str() {
        "json" => layer.json().boxed(),
        _ => layer.boxed(),
    };

    tracing_subscriber::registry().with(filter).with(layer).init();
    Ok(())
}
