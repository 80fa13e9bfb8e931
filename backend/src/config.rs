//! Configuration management for the Surf Report service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Command-line flags
//! 4. Environment variable overrides with SURF_ prefix

use std::path::PathBuf;

use clap::Parser;
use config::{ConfigError, Environment, File, Map, Source, Value};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{validate_coordinates, validate_daily_limit, GpsCoordinates};

/// Command-line flags. Environment variables override these.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "surf-report-server", version, about = "Marine weather report server")]
pub struct Cli {
    /// Server listening address
    #[arg(short = 'a', long)]
    pub address: Option<String>,

    /// File the latest snapshot is stored in
    #[arg(short = 'f', long)]
    pub store_file: Option<PathBuf>,

    /// Restore the cached snapshot on start (false clears it)
    #[arg(short = 'r', long, num_args = 0..=1, default_missing_value = "true")]
    pub restore: Option<bool>,

    /// Stormglass API key
    #[arg(short = 'k', long)]
    pub key: Option<String>,

    /// Directory holding per-environment config files
    #[arg(long, default_value = "config")]
    pub config_dir: PathBuf,
}

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Snapshot file configuration
    pub store: StoreConfig,

    /// Stormglass API configuration
    pub stormglass: StormglassConfig,

    /// The surf spot the report is fetched for
    pub location: LocationConfig,

    /// Upstream request allowance
    pub quota: QuotaConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Listen address, `host:port`
    pub address: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Path of the snapshot file
    pub file: PathBuf,

    /// Keep the cached snapshot across restarts
    pub restore: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StormglassConfig {
    /// API key sent in the Authorization header
    pub api_key: String,

    /// API base URL, without the `/v2` path
    pub base_url: String,

    /// Timeout for the whole upstream request
    pub timeout_secs: u64,

    /// Treat non-2xx responses as network failures
    pub strict_status: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocationConfig {
    pub lat: Decimal,
    pub lng: Decimal,
}

#[derive(Debug, Deserialize, Clone)]
pub struct QuotaConfig {
    /// Requests allowed per day by the upstream plan
    pub daily_limit: i64,
}

/// Flags given on the command line, as a configuration source
#[derive(Debug, Clone)]
struct CliSource(Cli);

impl Source for CliSource {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        let origin = "command line".to_string();
        let mut map = Map::new();

        if let Some(address) = &self.0.address {
            map.insert(
                "server.address".into(),
                Value::new(Some(&origin), address.as_str()),
            );
        }
        if let Some(file) = &self.0.store_file {
            map.insert(
                "store.file".into(),
                Value::new(Some(&origin), file.to_string_lossy().into_owned()),
            );
        }
        if let Some(restore) = self.0.restore {
            map.insert("store.restore".into(), Value::new(Some(&origin), restore));
        }
        if let Some(key) = &self.0.key {
            map.insert(
                "stormglass.api_key".into(),
                Value::new(Some(&origin), key.as_str()),
            );
        }

        Ok(map)
    }
}

impl Config {
    /// Load configuration from files, flags and environment variables
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let env = Environment::with_prefix("SURF")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true);
        Self::load_with_env(cli, env)
    }

    /// Load configuration with an explicit environment source
    pub fn load_with_env(cli: &Cli, env: Environment) -> Result<Self, ConfigError> {
        let environment =
            std::env::var("SURF_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let file = cli.config_dir.join(&environment);

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.address", "0.0.0.0:8080")?
            .set_default("store.file", "surfweather.json")?
            .set_default("store.restore", true)?
            .set_default("stormglass.api_key", "")?
            .set_default("stormglass.base_url", "https://api.stormglass.io")?
            .set_default("stormglass.timeout_secs", 10)?
            .set_default("stormglass.strict_status", false)?
            .set_default("location.lat", "32.801263")?
            .set_default("location.lng", "34.956112")?
            .set_default("quota.daily_limit", 10)?
            // Load environment-specific config file
            .add_source(File::with_name(&file.to_string_lossy()).required(false))
            .add_source(CliSource(cli.clone()))
            // Override with environment variables (SURF_ prefix)
            .add_source(env)
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_coordinates(&self.coordinates())
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        validate_daily_limit(self.quota.daily_limit)
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        if self.stormglass.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "Stormglass timeout must be at least one second".into(),
            ));
        }
        Ok(())
    }

    /// Coordinates of the surf spot
    pub fn coordinates(&self) -> GpsCoordinates {
        GpsCoordinates::new(self.location.lat, self.location.lng)
    }
}
