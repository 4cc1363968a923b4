use std::env;
use std::fmt;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STATUS_PERIOD_MS: u64 = 30_000;

/// Distinguishes runtime behavior for different stages of the client.
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

/// Top-level configuration for the client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub backend: BackendConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_url =
            env::var("NAVIGATOR_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidBaseUrl);
        }

        let timeout_secs = env::var("NAVIGATOR_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::InvalidTimeout)?;

        let status_period_ms = env::var("NAVIGATOR_STATUS_PERIOD_MS")
            .unwrap_or_else(|_| DEFAULT_STATUS_PERIOD_MS.to_string())
            .parse::<u64>()
            .ok()
            .filter(|ms| *ms > 0)
            .ok_or(ConfigError::InvalidStatusPeriod)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            backend: BackendConfig {
                base_url,
                request_timeout: Duration::from_secs(timeout_secs),
                status_poll_interval: Duration::from_millis(status_period_ms),
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings for reaching the remote interpretation and matching service.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub status_poll_interval: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            status_poll_interval: Duration::from_millis(DEFAULT_STATUS_PERIOD_MS),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBaseUrl,
    InvalidTimeout,
    InvalidStatusPeriod,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBaseUrl => {
                write!(f, "NAVIGATOR_BASE_URL must start with http:// or https://")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "NAVIGATOR_TIMEOUT_SECS must be a positive number of seconds")
            }
            ConfigError::InvalidStatusPeriod => write!(
                f,
                "NAVIGATOR_STATUS_PERIOD_MS must be a positive number of milliseconds"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
