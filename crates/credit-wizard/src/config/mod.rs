use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use reqwest::Url;

const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8000";
const DEFAULT_API_PATH: &str = "/api/v1";

/// Distinguishes runtime behavior for different stages of the wizard.
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

/// Top-level configuration for the wizard and its bundled stub service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub assessment: AssessmentServiceConfig,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let origin = env::var("ASSESSMENT_ORIGIN").unwrap_or_else(|_| DEFAULT_ORIGIN.to_string());
        let base_url =
            env::var("ASSESSMENT_API_URL").unwrap_or_else(|_| DEFAULT_API_PATH.to_string());
        let timeout_secs = env::var("ASSESSMENT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidTimeout)?;

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let assessment = AssessmentServiceConfig {
            origin,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        };
        assessment.origin_url()?;
        assessment.api_root()?;

        Ok(Self {
            environment,
            assessment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Location and limits for the external assessment service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentServiceConfig {
    /// Scheme and authority, e.g. `http://127.0.0.1:8000`. `/health` hangs off this.
    pub origin: String,
    /// Either an absolute URL or a path resolved against `origin`.
    pub base_url: String,
    pub timeout: Duration,
}

impl AssessmentServiceConfig {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            base_url: DEFAULT_API_PATH.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// The service origin, which must be an absolute `http`/`https` URL with a host.
    pub fn origin_url(&self) -> Result<Url, ConfigError> {
        parse_http_url(&self.origin).ok_or_else(|| ConfigError::InvalidOrigin {
            value: self.origin.clone(),
        })
    }

    /// Fully qualified API root, always ending in `/` so endpoints join beneath it.
    pub fn api_root(&self) -> Result<Url, ConfigError> {
        let invalid = || ConfigError::InvalidApiUrl {
            value: self.base_url.clone(),
        };
        let absolute =
            self.base_url.starts_with("http://") || self.base_url.starts_with("https://");
        let mut root = if absolute {
            parse_http_url(&self.base_url).ok_or_else(invalid)?
        } else {
            self.origin_url()?
                .join(&self.base_url)
                .map_err(|_| invalid())?
        };

        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        Ok(root)
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
        self.api_root()?
            .join(path.trim_start_matches('/'))
            .map_err(|_| ConfigError::InvalidApiUrl {
                value: path.to_string(),
            })
    }

    pub fn health_url(&self) -> Result<Url, ConfigError> {
        self.origin_url()?
            .join("/health")
            .map_err(|_| ConfigError::InvalidOrigin {
                value: self.origin.clone(),
            })
    }
}

fn parse_http_url(value: &str) -> Option<Url> {
    let url = Url::parse(value).ok()?;
    let supported = matches!(url.scheme(), "http" | "https") && url.has_host();
    supported.then_some(url)
}

/// Settings controlling the stub service binding.
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

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidTimeout,
    InvalidOrigin { value: String },
    InvalidApiUrl { value: String },
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidTimeout => {
                write!(f, "ASSESSMENT_TIMEOUT_SECS must be a whole number of seconds")
            }
            ConfigError::InvalidOrigin { value } => write!(
                f,
                "ASSESSMENT_ORIGIN must be an http:// or https:// URL with a host (got '{value}')"
            ),
            ConfigError::InvalidApiUrl { value } => write!(
                f,
                "ASSESSMENT_API_URL does not resolve to a usable URL (got '{value}')"
            ),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidTimeout
            | ConfigError::InvalidOrigin { .. }
            | ConfigError::InvalidApiUrl { .. } => None,
        }
    }
}
