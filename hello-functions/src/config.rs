use handler_contract::EnvSource;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default base URL of the API behind `hello/mom`.
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Default timeout for outgoing HTTP requests, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value in {var} env var: {value:?}. {hint}")]
    InvalidValue {
        var: &'static str,
        value: String,
        hint: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name of the handler to run, e.g. hello/world.
    /// Lambda sets `_HANDLER` from the function's handler setting.
    pub handler: Option<String>,
    /// E.g. https://pokeapi.co/api/v2
    pub api_base_url: String,
    /// Applied to every outgoing HTTP request as a whole
    pub http_timeout: Duration,
}

impl Config {
    /// Creates a new Config instance from environment variables and defaults.
    /// Uses default values where possible.
    pub fn from_env(env: &dyn EnvSource) -> Result<Self, ConfigError> {
        // an empty handler name is as good as none
        let handler = env.var("_HANDLER").filter(|v| !v.trim().is_empty());

        let api_base_url = env
            .var("API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let http_timeout = match env.var("HTTP_TIMEOUT_SECS") {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "HTTP_TIMEOUT_SECS",
                        value: v,
                        hint: "Must be a positive number of seconds, e.g. 10",
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        debug!(
            "Config: handler: {:?}, api base: {}, http timeout: {:?}",
            handler, api_base_url, http_timeout
        );

        Ok(Self {
            handler,
            api_base_url,
            http_timeout,
        })
    }
}
