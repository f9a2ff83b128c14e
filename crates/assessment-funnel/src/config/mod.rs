use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_FREE_TEXT_MAX_LENGTH: usize = 1000;
const DEFAULT_LEAD_SOURCE: &str = "website";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub funnel: FunnelConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let catalog_dir = env::var("FUNNEL_CATALOG_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let lead_scoring_enabled = match env::var("FUNNEL_ENABLE_LEAD_SCORING") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                name: "FUNNEL_ENABLE_LEAD_SCORING",
                value: raw,
            })?,
            Err(_) => true,
        };

        let free_text_max_length = match env::var("FUNNEL_FREE_TEXT_MAX_LENGTH") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|length| *length > 0)
                .ok_or(ConfigError::InvalidTextLimit)?,
            Err(_) => DEFAULT_FREE_TEXT_MAX_LENGTH,
        };

        let lead_source =
            env::var("FUNNEL_LEAD_SOURCE").unwrap_or_else(|_| DEFAULT_LEAD_SOURCE.to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            funnel: FunnelConfig {
                catalog_dir,
                lead_scoring_enabled,
                free_text_max_length,
                lead_source,
            },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Knobs for the assessment funnel itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunnelConfig {
    /// Directory holding `conditions.csv`, `sensations.csv` and `treatments.csv`.
    /// The built-in catalogs are used when unset.
    pub catalog_dir: Option<PathBuf>,
    pub lead_scoring_enabled: bool,
    pub free_text_max_length: usize,
    pub lead_source: String,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            catalog_dir: None,
            lead_scoring_enabled: true,
            free_text_max_length: DEFAULT_FREE_TEXT_MAX_LENGTH,
            lead_source: DEFAULT_LEAD_SOURCE.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidFlag { name: &'static str, value: String },
    InvalidTextLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be true or false (found '{value}')")
            }
            ConfigError::InvalidTextLimit => {
                write!(f, "FUNNEL_FREE_TEXT_MAX_LENGTH must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidFlag { .. }
            | ConfigError::InvalidTextLimit => None,
        }
    }
}
