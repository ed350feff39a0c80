//! Runtime settings resolved from the process environment (and `.env`).

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Deployment stage, from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    /// Unrecognised values fall back to development.
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub data: DataConfig,
}

impl AppConfig {
    /// Reads `.env` if present, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves every setting through `lookup`, applying defaults for absent keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("APP_ENV")
            .map(|value| AppEnvironment::parse(&value))
            .unwrap_or(AppEnvironment::Development);

        let host = lookup("APP_HOST").unwrap_or_else(|| ServerConfig::DEFAULT_HOST.to_string());
        let port = match lookup("APP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value: raw })?,
            None => ServerConfig::DEFAULT_PORT,
        };

        let log_level = lookup("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let data = DataConfig {
            rules_path: path_setting(&lookup, "RULES_PATH", DataConfig::DEFAULT_RULES_PATH)?,
            dataset_path: path_setting(&lookup, "DATASET_PATH", DataConfig::DEFAULT_DATASET_PATH)?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            data,
        })
    }
}

fn path_setting<F>(lookup: &F, key: &'static str, default: &str) -> Result<PathBuf, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyPath { key }),
        Some(value) => Ok(PathBuf::from(value.trim())),
        None => Ok(PathBuf::from(default)),
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 3000;

    /// `localhost` maps to the IPv4 loopback; anything else must be an IP literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost {
                    host: self.host.clone(),
                    source,
                })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Level or `EnvFilter` directive list used when `RUST_LOG` is unset.
    pub log_level: String,
}

/// Locations of the rule document and the historical dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    pub rules_path: PathBuf,
    pub dataset_path: PathBuf,
}

impl DataConfig {
    pub const DEFAULT_RULES_PATH: &'static str = "config/rules.json";
    pub const DEFAULT_DATASET_PATH: &'static str = "data/german.data";
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            rules_path: PathBuf::from(Self::DEFAULT_RULES_PATH),
            dataset_path: PathBuf::from(Self::DEFAULT_DATASET_PATH),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a port number, got '{value}'")]
    InvalidPort { value: String },
    #[error("APP_HOST '{host}' is neither localhost nor an IP address")]
    InvalidHost {
        host: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("{key} is set but empty")]
    EmptyPath { key: &'static str },
}
