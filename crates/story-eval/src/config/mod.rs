use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_MODEL_ID: &str = "ibm/granite-3-3-8b-instruct";
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";
pub const DEFAULT_API_VERSION: &str = "2024-05-31";

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
    pub enrichment: EnrichmentConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;
        let static_dir =
            PathBuf::from(env::var("APP_STATIC_DIR").unwrap_or_else(|_| "public".to_string()));

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = LogFormat::from_str(&env::var("APP_LOG_FORMAT").unwrap_or_default());

        Ok(Self {
            environment,
            server: ServerConfig {
                host,
                port,
                static_dir,
            },
            telemetry: TelemetryConfig {
                log_level,
                log_format,
            },
            enrichment: EnrichmentConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
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
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Settings for the optional watsonx.ai summary collaborator.
///
/// Credentials stay optional here; whether they are sufficient is decided when
/// the client is built so startup can log and fall back instead of failing.
#[derive(Clone)]
pub struct EnrichmentConfig {
    pub enabled: bool,
    pub service_url: Option<String>,
    pub api_key: Option<String>,
    pub project_id: Option<String>,
    pub model_id: String,
    pub iam_url: String,
    pub api_version: String,
    pub max_new_tokens: u32,
    pub timeout_secs: u64,
}

impl EnrichmentConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            enabled: env::var("USE_GRANITE").map(|flag| flag == "1").unwrap_or(false),
            service_url: non_empty_var("WATSONX_URL"),
            api_key: non_empty_var("WATSONX_APIKEY"),
            project_id: non_empty_var("WATSONX_PROJECT_ID"),
            model_id: non_empty_var("WATSONX_MODEL_ID")
                .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            iam_url: non_empty_var("WATSONX_IAM_URL")
                .unwrap_or_else(|| DEFAULT_IAM_URL.to_string()),
            api_version: non_empty_var("WATSONX_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            max_new_tokens: parse_var("WATSONX_MAX_NEW_TOKENS", 280)?,
            timeout_secs: parse_var("WATSONX_TIMEOUT_SECS", 30)?,
        })
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            service_url: None,
            api_key: None,
            project_id: None,
            model_id: DEFAULT_MODEL_ID.to_string(),
            iam_url: DEFAULT_IAM_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            max_new_tokens: 280,
            timeout_secs: 30,
        }
    }
}

impl fmt::Debug for EnrichmentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnrichmentConfig")
            .field("enabled", &self.enabled)
            .field("service_url", &self.service_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("project_id", &self.project_id)
            .field("model_id", &self.model_id)
            .field("iam_url", &self.iam_url)
            .field("api_version", &self.api_version)
            .field("max_new_tokens", &self.max_new_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match non_empty_var(key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidNumber { key }),
        None => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key } => write!(f, "{key} must be a non-negative integer"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
        }
    }
}
