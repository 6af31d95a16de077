//! Configuration module for the records service.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::AppError;
use crate::query::DEFAULT_TOP_N;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the datastore JSON document
    pub data_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// Page size used when a list request has no `limit`
    pub default_page_limit: usize,
    /// Upper bound applied to any requested `limit`
    pub max_page_limit: usize,
    /// Number of groups kept by top-N rankings when the request has no `top`
    pub default_top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("./fixtures/datastore.json"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            log_level: "info".to_string(),
            log_json: false,
            default_page_limit: 20,
            max_page_limit: 100,
            default_top_n: DEFAULT_TOP_N,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let data_path = env::var("CHURCH_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let bind_addr = parse_var("CHURCH_BIND_ADDR")?.unwrap_or(defaults.bind_addr);

        let log_level = env::var("CHURCH_LOG_LEVEL").unwrap_or(defaults.log_level);
        let log_json = parse_var("CHURCH_LOG_JSON")?.unwrap_or(defaults.log_json);

        let default_page_limit =
            parse_var("CHURCH_PAGE_LIMIT")?.unwrap_or(defaults.default_page_limit);
        let max_page_limit =
            parse_var("CHURCH_MAX_PAGE_LIMIT")?.unwrap_or(defaults.max_page_limit);
        let default_top_n = parse_var("CHURCH_TOP_N")?.unwrap_or(defaults.default_top_n);

        if default_page_limit == 0 || max_page_limit == 0 {
            return Err(AppError::Config(
                "page limits must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            data_path,
            bind_addr,
            log_level,
            log_json,
            default_page_limit: default_page_limit.min(max_page_limit),
            max_page_limit,
            default_top_n,
        })
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::Config(format!("Invalid {} value: {:?}", name, raw))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 7] = [
        "CHURCH_DATA_PATH",
        "CHURCH_BIND_ADDR",
        "CHURCH_LOG_LEVEL",
        "CHURCH_LOG_JSON",
        "CHURCH_PAGE_LIMIT",
        "CHURCH_MAX_PAGE_LIMIT",
        "CHURCH_TOP_N",
    ];

    // Both scenarios live in one test since they mutate process-wide env vars.
    #[test]
    fn test_config_from_env() {
        for var in VARS {
            env::remove_var(var);
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.data_path, PathBuf::from("./fixtures/datastore.json"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
        assert_eq!(config.default_page_limit, 20);
        assert_eq!(config.max_page_limit, 100);
        assert_eq!(config.default_top_n, 5);

        env::set_var("CHURCH_BIND_ADDR", "not-an-address");
        let err = Config::from_env().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");

        for var in VARS {
            env::remove_var(var);
        }
    }
}
