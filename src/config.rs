//! Server configuration.
//!
//! Values start from [`ServerConfig::default`], are overridden by `TODOS_*`
//! environment variables, and finally by command-line flags in `main`.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_COOKIE_NAME: &str = "launch-school-todos-session-id";
pub const DEFAULT_SESSION_DAYS: u32 = 31;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("Could not determine a data directory for the session database")]
    NoDataDir,
}

/// Where sessions are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionBackend {
    /// In-memory SQLite; sessions vanish when the process exits.
    Memory,
    /// SQLite database file at the given path.
    File(PathBuf),
    /// SQLite database file in the platform data directory.
    Default,
}

impl SessionBackend {
    fn parse(value: &str) -> Self {
        match value {
            "memory" | ":memory:" => Self::Memory,
            "" | "default" => Self::Default,
            path => Self::File(PathBuf::from(path)),
        }
    }

    /// Resolve [`SessionBackend::Default`] to a concrete file path.
    pub fn resolve(&self) -> Result<Option<PathBuf>, ConfigError> {
        match self {
            Self::Memory => Ok(None),
            Self::File(path) => Ok(Some(path.clone())),
            Self::Default => {
                let dirs = directories::ProjectDirs::from("", "", "session-todos")
                    .ok_or(ConfigError::NoDataDir)?;
                Ok(Some(dirs.data_dir().join("sessions.db")))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub session_backend: SessionBackend,
    /// Directory served for any path no route matches.
    pub public_dir: PathBuf,
    pub cookie_name: String,
    /// Adds the `Secure` attribute to the session cookie.
    pub cookie_secure: bool,
    pub session_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3000,
            session_backend: SessionBackend::Default,
            public_dir: PathBuf::from("public"),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            cookie_secure: false,
            session_ttl: days(DEFAULT_SESSION_DAYS),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `TODOS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from defaults plus whatever `lookup` returns for each key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = lookup("TODOS_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("TODOS_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "TODOS_PORT",
                value: port,
            })?;
        }
        if let Some(backend) = lookup("TODOS_SESSION_DB") {
            config.session_backend = SessionBackend::parse(backend.trim());
        }
        if let Some(dir) = lookup("TODOS_PUBLIC_DIR") {
            config.public_dir = PathBuf::from(dir);
        }
        if let Some(name) = lookup("TODOS_COOKIE_NAME") {
            if name.is_empty() || name.contains([';', '=', ' ']) {
                return Err(ConfigError::InvalidValue {
                    key: "TODOS_COOKIE_NAME",
                    value: name,
                });
            }
            config.cookie_name = name;
        }
        if let Some(secure) = lookup("TODOS_COOKIE_SECURE") {
            config.cookie_secure = parse_bool(&secure).ok_or(ConfigError::InvalidValue {
                key: "TODOS_COOKIE_SECURE",
                value: secure,
            })?;
        }
        if let Some(session_days) = lookup("TODOS_SESSION_DAYS") {
            let parsed: u32 = session_days
                .parse()
                .ok()
                .filter(|d| *d > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: "TODOS_SESSION_DAYS",
                    value: session_days,
                })?;
            config.session_ttl = days(parsed);
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn days(n: u32) -> Duration {
    Duration::from_secs(u64::from(n) * 24 * 60 * 60)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
