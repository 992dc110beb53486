use crate::markup::QuestionType;
use crate::scoring::{parse_start, AssignOptions, NumberingScheme};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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
    pub formatter: FormatterDefaults,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            formatter: FormatterDefaults::from_env()?,
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

/// Values used when a request leaves the question type or scoring settings out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatterDefaults {
    pub question_type: QuestionType,
    pub scoring: AssignOptions,
}

impl Default for FormatterDefaults {
    fn default() -> Self {
        Self {
            question_type: QuestionType::Radio,
            scoring: AssignOptions::default(),
        }
    }
}

impl FormatterDefaults {
    fn from_env() -> Result<Self, ConfigError> {
        let mut defaults = Self::default();

        if let Ok(raw) = env::var("APP_DEFAULT_QUESTION_TYPE") {
            defaults.question_type = raw
                .parse()
                .map_err(|_| ConfigError::InvalidQuestionType(raw))?;
        }
        if let Ok(raw) = env::var("APP_SCORING_SCHEME") {
            defaults.scoring.scheme = raw
                .parse::<NumberingScheme>()
                .map_err(|_| ConfigError::InvalidScoringScheme(raw))?;
        }
        if let Ok(raw) = env::var("APP_DEFAULT_SCORE") {
            defaults.scoring.start =
                parse_start(&raw).map_err(|_| ConfigError::InvalidDefaultScore(raw))?;
        }
        if let Ok(raw) = env::var("APP_PRESERVE_SCORES") {
            defaults.scoring.preserve_existing =
                parse_flag(&raw).ok_or(ConfigError::InvalidPreserveScores(raw))?;
        }

        Ok(defaults)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidQuestionType(String),
    InvalidScoringScheme(String),
    InvalidDefaultScore(String),
    InvalidPreserveScores(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidQuestionType(value) => write!(
                f,
                "APP_DEFAULT_QUESTION_TYPE '{}' is not one of radio, drop, check, rank, info",
                value
            ),
            ConfigError::InvalidScoringScheme(value) => write!(
                f,
                "APP_SCORING_SCHEME '{}' is not one of incremental, decremental, fixed",
                value
            ),
            ConfigError::InvalidDefaultScore(value) => {
                write!(f, "APP_DEFAULT_SCORE '{}' must be an integer", value)
            }
            ConfigError::InvalidPreserveScores(value) => {
                write!(f, "APP_PRESERVE_SCORES '{}' must be a boolean", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
