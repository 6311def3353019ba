use std::env;
use tracing::warn;

/// Server configuration, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Address the HTTP listener binds to (`BIND_ADDR`)
    pub bind_addr: String,
    /// PostgreSQL connection string (`DATABASE_URL`); in-memory storage when unset
    pub database_url: Option<String>,
    /// Buffered payloads per room topic (`BROADCAST_CAPACITY`)
    pub broadcast_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            database_url: None,
            broadcast_capacity: 100,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or unparsable values
    /// fall back to the defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let broadcast_capacity = match lookup("BROADCAST_CAPACITY") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                _ => {
                    warn!(value = %raw, "Invalid BROADCAST_CAPACITY, using default");
                    defaults.broadcast_capacity
                }
            },
            None => defaults.broadcast_capacity,
        };

        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            broadcast_capacity,
        }
    }
}
