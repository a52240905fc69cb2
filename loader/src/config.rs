//! Configuration for the feed loader.
//!
//! Loaded with figment from, highest precedence first:
//! 1. Environment variables prefixed with `QUAKE_` (e.g. `QUAKE_MIN_MAGNITUDE`)
//! 2. TOML file at `~/.config/quake/config.toml`, or the path given
//! 3. Defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use quake_core::query::{DEFAULT_MIN_MAGNITUDE, DEFAULT_ORDER_BY};
use quake_core::{FeedQuery, USGS_QUERY_URL};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const CONFIG_DIR_NAME: &str = "quake";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed query endpoint.
    pub endpoint: String,
    /// Passed through verbatim as `minmag`.
    #[serde(deserialize_with = "string_or_number")]
    pub min_magnitude: String,
    /// Passed through verbatim as `orderby`.
    pub order_by: String,
    /// Bound on the whole request, connect through body.
    pub timeout_secs: u64,
    /// Check for a network route to the endpoint host before the request.
    pub connectivity_check: bool,
    /// Make the check a TCP connect to the endpoint itself. A refused or
    /// unreachable endpoint then reads as "no internet connection".
    pub strict_endpoint_check: bool,
}

/// `QUAKE_MIN_MAGNITUDE=6` reaches serde as a number, not a string.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(text) => text,
        Scalar::Int(int) => int.to_string(),
        Scalar::Float(float) => float.to_string(),
    })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: USGS_QUERY_URL.to_string(),
            min_magnitude: DEFAULT_MIN_MAGNITUDE.to_string(),
            order_by: DEFAULT_ORDER_BY.to_string(),
            timeout_secs: 15,
            connectivity_check: true,
            strict_endpoint_check: false,
        }
    }
}

impl Config {
    /// Load from the default file location and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        Self::extract(Self::figment(&config_file).merge(Env::prefixed("QUAKE_")))
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    fn figment(config_file: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
    }

    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// # Errors
    ///
    /// Returns an error if any value is unusable.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::validation("timeout_secs must be greater than 0"));
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(Error::validation(format!(
                "endpoint must be an http(s) URL: {}",
                self.endpoint
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn query(&self) -> FeedQuery {
        FeedQuery::new(self.min_magnitude.clone(), self.order_by.clone())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
