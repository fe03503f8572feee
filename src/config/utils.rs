/// Configuration utilities - loading and validation
///
/// Configuration is loaded once at the boundary (binary or caller) and passed
/// by value into `BridgeClient::new`; nothing in the library reads it globally.
use super::schemas::Config;
use crate::errors::ConfigurationError;
use crate::logger::{self, LogTag};
use std::path::Path;
use url::Url;

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "data/config.toml";

/// Load configuration from [`CONFIG_FILE_PATH`]
pub fn load_config() -> Result<Config, ConfigurationError> {
    load_config_from_path(CONFIG_FILE_PATH)
}

/// Load configuration from a specific TOML file
///
/// A missing file yields the defaults. An unreadable or malformed file is an
/// error, as is a file whose values fail [`Config::validate`].
pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<Config, ConfigurationError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let config = if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigurationError::FileError {
            path: display.clone(),
            error: e.to_string(),
        })?;
        parse_config(&contents).map_err(|e| match e {
            ConfigurationError::FileError { error, .. } => ConfigurationError::FileError {
                path: display.clone(),
                error,
            },
            other => other,
        })?
    } else {
        logger::warning(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", display),
        );
        Config::default()
    };

    logger::debug(
        LogTag::Config,
        &format!(
            "Loaded config: api={}, rpc={}, gas_limit={}, slippage={}",
            config.api.base_url,
            config.chain.rpc_url,
            config.executor.default_gas_limit,
            config.transfer.default_slippage_tolerance
        ),
    );

    Ok(config)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(contents: &str) -> Result<Config, ConfigurationError> {
    let config = toml::from_str::<Config>(contents).map_err(|e| ConfigurationError::FileError {
        path: "<inline>".to_string(),
        error: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Check URLs and numeric ranges
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validate_http_url(&self.api.base_url)?;
        validate_http_url(&self.chain.rpc_url)?;

        let slippage = self.transfer.default_slippage_tolerance;
        if !slippage.is_finite() || !(0.0..=1.0).contains(&slippage) {
            return Err(ConfigurationError::InvalidConfig {
                field: "transfer.default_slippage_tolerance".to_string(),
                reason: format!("{} is outside [0, 1]", slippage),
            });
        }

        if self.executor.default_gas_limit == 0 {
            return Err(ConfigurationError::InvalidConfig {
                field: "executor.default_gas_limit".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.executor.receipt_poll_interval_ms == 0 {
            return Err(ConfigurationError::InvalidConfig {
                field: "executor.receipt_poll_interval_ms".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.transfer.private_key_env.trim().is_empty() {
            return Err(ConfigurationError::InvalidConfig {
                field: "transfer.private_key_env".to_string(),
                reason: "must name an environment variable".to_string(),
            });
        }

        Ok(())
    }
}

fn validate_http_url(raw: &str) -> Result<(), ConfigurationError> {
    let url = Url::parse(raw).map_err(|e| ConfigurationError::InvalidUrl {
        url: raw.to_string(),
        error: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigurationError::InvalidUrl {
            url: raw.to_string(),
            error: format!("unsupported scheme '{}'", scheme),
        }),
    }
}
