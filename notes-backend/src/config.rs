use std::env;
use std::fmt;

use crate::error::ConfigError;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const BIND_ADDRESS: &str = "BIND_ADDRESS";
    /// Set (to anything) when the database is local and reached without TLS.
    /// Leave unset for a hosted database.
    pub const LOCAL: &str = "LOCAL";
}

/// Default values
pub mod defaults {
    pub const DATABASE_URL: &str = "./.db/notes.db";
    pub const BIND_ADDRESS: &str = "0.0.0.0";
}

/// How the backend talks to its database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseTransport {
    Plain,
    Encrypted,
}

impl DatabaseTransport {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseTransport::Plain => "plain",
            DatabaseTransport::Encrypted => "encrypted",
        }
    }
}

impl fmt::Display for DatabaseTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    pub database_url: String,
    pub database_transport: DatabaseTransport,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(env_vars::PORT) {
            Some(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            _ => return Err(ConfigError::MissingPort),
        };

        let database_transport = if lookup(env_vars::LOCAL).is_some() {
            DatabaseTransport::Plain
        } else {
            DatabaseTransport::Encrypted
        };

        let database_url = lookup(env_vars::DATABASE_URL)
            .unwrap_or_else(|| defaults::DATABASE_URL.to_string());
        check_database_url(&database_url)?;

        Ok(Self {
            port,
            bind_address: lookup(env_vars::BIND_ADDRESS)
                .unwrap_or_else(|| defaults::BIND_ADDRESS.to_string()),
            database_url,
            database_transport,
        })
    }
}

/// Only SQLite locations are accepted. Any other `scheme://` URL would
/// otherwise be opened as a relative file path.
fn check_database_url(url: &str) -> Result<(), ConfigError> {
    match url.split_once("://") {
        Some((scheme, _)) if !scheme.eq_ignore_ascii_case("sqlite") => {
            Err(ConfigError::UnsupportedDatabaseUrl(scheme.to_string()))
        }
        _ => Ok(()),
    }
}
