mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the configuration named by `CONFIG_PATH`, falling back to
/// `config.yaml`. When neither is present the built-in defaults apply.
pub async fn load() -> Result<Config> {
    match env::var("CONFIG_PATH") {
        Ok(path) => load_from(&path).await,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from(DEFAULT_CONFIG_PATH).await,
        Err(_) => {
            debug!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    let config = parse(&config_str)?;

    Ok(config)
}

pub fn parse(config_str: &str) -> Result<Config> {
    // An empty document deserializes to unit, not to a mapping
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_str(config_str)?;
    config.validate()?;

    Ok(config)
}

/// Parses a log level or a full filter directive such as
/// `support_relay=debug,tower_http=info`.
pub fn log_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| {
        Error::config(format!(
            "Invalid log level: '{}' ({}). Use a level such as error, warn, info, debug, trace \
             or target directives like support_relay=debug",
            directives, e
        ))
    })
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.inference.url.trim().is_empty() {
            return Err(Error::config("inference.url must not be empty"));
        }
        if self.inference.model.trim().is_empty() {
            return Err(Error::config("inference.model must not be empty"));
        }
        if self.inference.timeout_secs == 0 {
            return Err(Error::config("inference.timeout_secs must be greater than zero"));
        }
        if self.prompt.user_label.trim().is_empty() || self.prompt.assistant_label.trim().is_empty()
        {
            return Err(Error::config("prompt role labels must not be empty"));
        }
        Ok(())
    }
}
