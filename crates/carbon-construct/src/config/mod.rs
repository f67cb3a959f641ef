use crate::greenstar::validation::DEFAULT_LAYER_DRIFT_TOLERANCE;
use crate::greenstar::{
    CatalogImportError, ComplianceCalculator, CreditCatalog, InitiativeCatalog, InputGuard,
};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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
    pub greenstar: GreenstarConfig,
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

        let initiatives_csv = env::var("GREENSTAR_INITIATIVES_CSV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let layer_drift_tolerance = match env::var("GREENSTAR_LAYER_DRIFT_TOLERANCE") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value >= 0.0)
                .ok_or(ConfigError::InvalidDriftTolerance(raw))?,
            Err(_) => DEFAULT_LAYER_DRIFT_TOLERANCE,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            greenstar: GreenstarConfig {
                initiatives_csv,
                layer_drift_tolerance,
            },
        })
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

/// Reference data and tolerances for the compliance calculator.
#[derive(Debug, Clone)]
pub struct GreenstarConfig {
    pub initiatives_csv: Option<PathBuf>,
    pub layer_drift_tolerance: f64,
}

impl Default for GreenstarConfig {
    fn default() -> Self {
        Self {
            initiatives_csv: None,
            layer_drift_tolerance: DEFAULT_LAYER_DRIFT_TOLERANCE,
        }
    }
}

impl GreenstarConfig {
    /// Loads the initiative catalog once and builds a shareable calculator.
    pub fn build_calculator(&self) -> Result<ComplianceCalculator, CatalogImportError> {
        let initiatives = match &self.initiatives_csv {
            Some(path) => InitiativeCatalog::from_path(path)?,
            None => InitiativeCatalog::standard(),
        };

        Ok(
            ComplianceCalculator::new(initiatives, CreditCatalog::standard())
                .with_guard(InputGuard::new(self.layer_drift_tolerance)),
        )
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidDriftTolerance(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidDriftTolerance(raw) => write!(
                f,
                "GREENSTAR_LAYER_DRIFT_TOLERANCE must be a non-negative fraction (found '{raw}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidDriftTolerance(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
