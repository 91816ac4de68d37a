use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_NAME: &str = "Cleaning Service";
const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
const DEFAULT_PLACES_COUNTRY: &str = "us";

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
    pub mail: MailConfig,
    pub places: PlacesConfig,
}

impl AppConfig {
    /// Read configuration from the process environment (and `.env`, when present).
    ///
    /// Relay and geocoding settings are optional here; a missing value only
    /// surfaces when a request actually needs it.
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

        let smtp_port = match non_empty_var("SMTP_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidSmtpPort)?,
            None => DEFAULT_SMTP_PORT,
        };

        let mail = MailConfig {
            host: non_empty_var("SMTP_HOST"),
            port: smtp_port,
            username: non_empty_var("SMTP_USER"),
            password: non_empty_var("SMTP_PASS"),
            recipient: non_empty_var("RECIPIENT_EMAIL"),
            from_name: non_empty_var("MAIL_FROM_NAME")
                .unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
        };

        let places = PlacesConfig {
            api_key: non_empty_var("GOOGLE_PLACES_API_KEY"),
            base_url: non_empty_var("PLACES_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PLACES_BASE_URL.to_string()),
            country: non_empty_var("PLACES_COUNTRY")
                .unwrap_or_else(|| DEFAULT_PLACES_COUNTRY.to_string()),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            mail,
            places,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
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

/// Outbound mail relay settings. `username` doubles as the sender address.
#[derive(Clone)]
pub struct MailConfig {
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub recipient: Option<String>,
    pub from_name: String,
}

impl MailConfig {
    /// Port 465 speaks TLS from the first byte; every other port upgrades via STARTTLS.
    pub fn implicit_tls(&self) -> bool {
        self.port == 465
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("recipient", &self.recipient)
            .field("from_name", &self.from_name)
            .finish()
    }
}

/// Geocoding upstream settings.
#[derive(Clone)]
pub struct PlacesConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub country: String,
}

impl fmt::Debug for PlacesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacesConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("country", &self.country)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidSmtpPort,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidSmtpPort => write!(f, "SMTP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidSmtpPort => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
