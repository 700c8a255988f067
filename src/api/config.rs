//! Runtime configuration read from environment variables.

use std::path::PathBuf;
use thiserror::Error;
use urlencoding::encode;

/// Configuration errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// CORS origin policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

/// API server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub port: u16,
    /// PostgreSQL URL; `None` selects the in-memory store
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub cors_origins: CorsOrigins,
    /// Include raw diagnostics in 500 response bodies
    pub expose_error_details: bool,
    /// Requests per minute across the server; 0 disables limiting
    pub rate_limit_per_minute: u32,
    pub max_body_bytes: usize,
    pub frontend_dir: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            database_url: None,
            db_max_connections: 10,
            cors_origins: CorsOrigins::List(vec!["http://localhost:3000".to_string()]),
            expose_error_details: false,
            rate_limit_per_minute: 600,
            max_body_bytes: 10 * 1024 * 1024,
            frontend_dir: None,
            log_format: LogFormat::Text,
        }
    }
}

impl ApiConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` to resolve variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let cors_origins = match get("CORS_ORIGINS") {
            Some(v) if v == "*" => CorsOrigins::Any,
            Some(v) => CorsOrigins::List(
                v.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect(),
            ),
            None => defaults.cors_origins,
        };

        let log_format = match get("LOG_FORMAT").map(|v| v.to_lowercase()).as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "LOG_FORMAT",
                    value: other.to_string(),
                    reason: "expected text or json".to_string(),
                });
            }
        };

        Ok(Self {
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            database_url: database_url(&get),
            db_max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                get("DB_MAX_CONNECTIONS"),
                defaults.db_max_connections,
            )?,
            cors_origins,
            expose_error_details: parse_bool(
                "EXPOSE_ERROR_DETAILS",
                get("EXPOSE_ERROR_DETAILS"),
                defaults.expose_error_details,
            )?,
            rate_limit_per_minute: parse_or(
                "RATE_LIMIT_PER_MINUTE",
                get("RATE_LIMIT_PER_MINUTE"),
                defaults.rate_limit_per_minute,
            )?,
            max_body_bytes: parse_or(
                "MAX_BODY_BYTES",
                get("MAX_BODY_BYTES"),
                defaults.max_body_bytes,
            )?,
            frontend_dir: get("FRONTEND_DIR").map(PathBuf::from),
            log_format,
        })
    }
}

/// `DATABASE_URL` wins; otherwise a URL is assembled when any `DB_*` part is set.
fn database_url(get: &impl Fn(&str) -> Option<String>) -> Option<String> {
    if let Some(url) = get("DATABASE_URL") {
        return Some(url);
    }

    let parts = ["DB_HOST", "DB_PORT", "DB_USER", "DB_PASSWORD", "DB_DATABASE"];
    if !parts.iter().any(|key| get(key).is_some()) {
        return None;
    }

    let host = get("DB_HOST").unwrap_or_else(|| "localhost".to_string());
    let port = get("DB_PORT").unwrap_or_else(|| "5432".to_string());
    let user = get("DB_USER").unwrap_or_else(|| "postgres".to_string());
    let database = get("DB_DATABASE").unwrap_or_else(|| "petlogixdb".to_string());
    // User, password and database name may contain URL-reserved characters
    let credentials = match get("DB_PASSWORD") {
        Some(password) => format!("{}:{}", encode(&user), encode(&password)),
        None => encode(&user).into_owned(),
    };
    Some(format!(
        "postgres://{credentials}@{host}:{port}/{}",
        encode(&database)
    ))
}

fn parse_or<T>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(v) => v.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: v.clone(),
            reason: e.to_string(),
        }),
    }
}

fn parse_bool(key: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    match value.map(|v| v.to_lowercase()).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(ConfigError::Invalid {
            key,
            value: other.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
