//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::series::GeneratorConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub series: GeneratorConfig,

    #[serde(default)]
    pub regions: RegionsConfig,

    #[serde(default)]
    pub map: MapConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Socket address to bind
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid(format!(
                "bad listen address {}:{}: {}",
                self.host, self.port, e
            )))
    }
}

/// Region boundaries and the temperatures assigned to them
#[derive(Debug, Clone, Deserialize)]
pub struct RegionsConfig {
    #[serde(default = "default_regions_path")]
    pub path: PathBuf,

    #[serde(default = "default_regions_seed")]
    pub seed: u64,

    #[serde(default = "default_min_temperature")]
    pub min_temperature: f64,

    #[serde(default = "default_max_temperature")]
    pub max_temperature: f64,
}

fn default_regions_path() -> PathBuf {
    PathBuf::from("singapore_regions.geojson")
}

fn default_regions_seed() -> u64 {
    42
}

fn default_min_temperature() -> f64 {
    26.0
}

fn default_max_temperature() -> f64 {
    34.0
}

impl Default for RegionsConfig {
    fn default() -> Self {
        Self {
            path: default_regions_path(),
            seed: default_regions_seed(),
            min_temperature: default_min_temperature(),
            max_temperature: default_max_temperature(),
        }
    }
}

/// Map viewport
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    #[serde(default = "default_center_lon")]
    pub center_lon: f64,

    #[serde(default = "default_zoom")]
    pub zoom: u8,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_legend_name")]
    pub legend_name: String,
}

fn default_center_lat() -> f64 {
    1.35
}

fn default_center_lon() -> f64 {
    103.82
}

fn default_zoom() -> u8 {
    11
}

fn default_width() -> u32 {
    700
}

fn default_height() -> u32 {
    500
}

fn default_legend_name() -> String {
    "Temperature (°C)".to_string()
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lon: default_center_lon(),
            zoom: default_zoom(),
            width: default_width(),
            height: default_height(),
            legend_name: default_legend_name(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("weather-tracker").join("config.toml")),
            Some(PathBuf::from("/etc/weather-tracker/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup; unparsable numbers are ignored
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("WEATHER_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("WEATHER_API_PORT").and_then(|v| v.parse().ok()) {
            self.api.port = port;
        }

        if let Some(path) = lookup("WEATHER_REGIONS_PATH") {
            self.regions.path = PathBuf::from(path);
        }

        // One seed drives both the series and the region temperatures
        if let Some(seed) = lookup("WEATHER_SEED").and_then(|v| v.parse().ok()) {
            self.series.seed = seed;
            self.regions.seed = seed;
        }
        if let Some(count) = lookup("WEATHER_SAMPLE_COUNT").and_then(|v| v.parse().ok()) {
            self.series.sample_count = count;
        }

        if let Some(level) = lookup("WEATHER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("WEATHER_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Weather Tracker Configuration
#
# Environment variables override these settings:
# - WEATHER_API_HOST
# - WEATHER_API_PORT
# - WEATHER_REGIONS_PATH
# - WEATHER_SEED
# - WEATHER_SAMPLE_COUNT
# - WEATHER_LOG_LEVEL
# - WEATHER_LOG_FORMAT

[api]
# Server host
host = "0.0.0.0"

# Server port
port = 8082

# Allowed CORS origins (empty allows any)
cors_origins = []

# Request timeout in seconds
request_timeout_secs = 30

[series]
# RNG seed; the same seed always yields the same series
seed = 42

# Number of samples, one per interval, ending now
sample_count = 100
interval_secs = 60

# Each measure is base + amplitude * wave(0..span_pi * PI) + N(0, noise_std)
[series.temperature]
base = 20.0
amplitude = 5.0
waveform = "sine"
span_pi = 3.0
noise_std = 0.5

[series.humidity]
base = 50.0
amplitude = 10.0
waveform = "cosine"
span_pi = 2.0
noise_std = 1.0

[series.wind_speed]
base = 10.0
amplitude = 3.0
waveform = "sine"
span_pi = 4.0
noise_std = 0.7

[regions]
# GeoJSON FeatureCollection with a "region" property per feature
path = "singapore_regions.geojson"

# Temperatures are drawn uniformly from [min_temperature, max_temperature)
seed = 42
min_temperature = 26.0
max_temperature = 34.0

[map]
center_lat = 1.35
center_lon = 103.82
zoom = 11
width = 700
height = 500
legend_name = "Temperature (°C)"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/weather-tracker/weather-tracker.log"
"#
    .to_string()
}
