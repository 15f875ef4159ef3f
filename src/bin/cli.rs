//! Weather Tracker CLI
//!
//! Command-line interface for offline use:
//! - Generate the synthetic series
//! - Render pages to static HTML
//! - Print the default configuration

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weather_tracker::config::{generate_default_config, Config};
use weather_tracker::render::{render_dashboard, render_page, render_tracker};
use weather_tracker::series::{describe, validate, write_csv, Column, SeriesGenerator, WeatherSeries};

#[derive(Parser)]
#[command(name = "weather-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Synthetic weather series and Singapore region map")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations, then environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageKind {
    Dashboard,
    Map,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the weather series
    Generate {
        /// RNG seed (default: from config)
        #[arg(long)]
        seed: Option<u64>,
        /// Number of samples (default: from config)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Render a page to HTML
    Render {
        page: PageKind,
        /// Include diagnostics output
        #[arg(long)]
        debug: bool,
        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for data
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_tracker=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };

    match cli.command {
        Commands::Generate { seed, count } => {
            let mut series_config = config.series.clone();
            if let Some(seed) = seed {
                series_config.seed = seed;
            }
            if let Some(count) = count {
                series_config.sample_count = count;
            }

            let series = SeriesGenerator::new(series_config)
                .generate()
                .context("generating weather data")?;
            let report = validate(&series).context("validating weather data")?;
            for warning in &report.warnings {
                eprintln!("⚠️ {}", warning);
            }

            match cli.format {
                OutputFormat::Table => print_table(&series),
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(series.samples())?);
                }
                OutputFormat::Csv => {
                    write_csv(&series, std::io::stdout().lock()).context("writing CSV")?;
                }
            }
        }

        Commands::Render { page, debug, out } => {
            let rendered = match page {
                PageKind::Dashboard => render_dashboard(&config, debug, Utc::now()),
                PageKind::Map => render_tracker(&config, debug, Utc::now()),
            };
            let html = render_page(rendered.page());

            match &out {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(path, &html)
                        .with_context(|| format!("writing {}", path.display()))?;
                    eprintln!("Page written to {:?}", path);
                }
                None => print!("{}", html),
            }

            if let Some(cause) = rendered.fatal() {
                eprintln!("Page halted: {:?}", cause);
                std::process::exit(1);
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn print_table(series: &WeatherSeries) {
    // Header
    print!("{:<20}", "Time");
    for column in Column::all() {
        print!(" | {:>18}", column.label());
    }
    println!();

    // Separator
    println!("{}", "-".repeat(20 + Column::all().len() * 21));

    // Data rows
    for sample in series.samples() {
        print!("{:<20}", sample.timestamp.format("%Y-%m-%d %H:%M:%S"));
        for &column in Column::all() {
            let value = sample.value(column);
            let cell = if value.is_nan() {
                "-".to_string()
            } else {
                format!("{:.2}", value)
            };
            print!(" | {:>18}", cell);
        }
        println!();
    }

    println!();
    for (column, summary) in describe(series) {
        match summary {
            Some(s) => println!(
                "{:<18} mean={:.2} std={:.2} min={:.2} max={:.2}",
                column.label(),
                s.mean,
                s.std,
                s.min,
                s.max
            ),
            None => println!("{:<18} no values", column.label()),
        }
    }
}
