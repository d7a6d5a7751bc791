//! Process configuration, read once from the environment at startup.

use crate::error::ConfigError;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub api: ApiOptions,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    /// Full connection URL. When set, the individual fields below are ignored.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
    pub max_connections: u32,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub frontend_dir: PathBuf,
}

/// Behaviour switches for the student handlers.
#[derive(Clone, Debug)]
pub struct ApiOptions {
    pub validate_email: bool,
    pub detailed_conflicts: bool,
    pub max_body_bytes: usize,
}

impl Default for ApiOptions {
    fn default() -> Self {
        ApiOptions {
            validate_email: true,
            detailed_conflicts: true,
            max_body_bytes: 64 * 1024,
        }
    }
}

impl Config {
    /// Read from process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let text = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let defaults = ApiOptions::default();
        Ok(Config {
            database: DatabaseConfig {
                url: get("DATABASE_URL"),
                host: text("DB_HOST", "localhost"),
                port: parse_or("DB_PORT", get("DB_PORT"), 5432)?,
                user: text("DB_USER", "postgres"),
                password: text("DB_PASSWORD", "postgres"),
                name: text("DB_NAME", "student_db"),
                ssl_mode: text("DB_SSL_MODE", "disable"),
                max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), 5)?,
            },
            server: ServerConfig {
                host: text("SERVER_HOST", "0.0.0.0"),
                port: parse_or("SERVER_PORT", get("SERVER_PORT"), 8080)?,
                frontend_dir: PathBuf::from(text("FRONTEND_DIR", "./frontend")),
            },
            api: ApiOptions {
                validate_email: parse_bool("API_VALIDATE_EMAIL", get("API_VALIDATE_EMAIL"), defaults.validate_email)?,
                detailed_conflicts: parse_bool(
                    "API_DETAILED_CONFLICTS",
                    get("API_DETAILED_CONFLICTS"),
                    defaults.detailed_conflicts,
                )?,
                max_body_bytes: parse_or("API_MAX_BODY_BYTES", get("API_MAX_BODY_BYTES"), defaults.max_body_bytes)?,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl DatabaseConfig {
    /// Connection options for the application database.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url).map_err(|e| ConfigError::InvalidValue {
                key: "DATABASE_URL",
                value: redact_url(url),
                reason: e.to_string(),
            });
        }
        let ssl_mode = PgSslMode::from_str(&self.ssl_mode).map_err(|e| ConfigError::InvalidValue {
            key: "DB_SSL_MODE",
            value: self.ssl_mode.clone(),
            reason: e.to_string(),
        })?;
        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(ssl_mode))
    }

    /// Name of the application database, taken from the URL when one is configured.
    pub fn database_name(&self) -> Result<String, ConfigError> {
        let opts = self.connect_options()?;
        Ok(opts
            .get_database()
            .map(str::to_string)
            .unwrap_or_else(|| self.name.clone()))
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value: v,
            reason: e.to_string(),
        }),
    }
}

fn parse_bool(key: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(v) = raw else {
        return Ok(default);
    };
    match v.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: v,
            reason: "expected true or false".into(),
        }),
    }
}

fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}
