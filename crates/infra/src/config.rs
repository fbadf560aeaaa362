//! Configuration loading and representation.
//!
//! Everything comes from environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BIND_ADDR` | `0.0.0.0:8080` | listen address |
//! | `PORT` | unset | overrides only the port of `BIND_ADDR` (PaaS convention) |
//! | `DATABASE_URL` | `sqlite://posts.db` | SQLite database URL |
//! | `USE_PERSISTENT_STORES` | `true` | `false` selects the in-memory store |

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://posts.db";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(var: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            reason: reason.into(),
        }
    }
}

/// Which storage engine backs the post store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    InMemory,
    Sqlite { database_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreKind,
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary lookup (tests inject a map here).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let mut bind_addr: SocketAddr = raw_addr
            .trim()
            .parse()
            .map_err(|e| ConfigError::invalid("BIND_ADDR", format!("{raw_addr:?}: {e}")))?;

        if let Some(raw_port) = lookup("PORT") {
            let port: u16 = raw_port
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("PORT", format!("{raw_port:?}: {e}")))?;
            bind_addr.set_port(port);
        }

        let persistent = match lookup("USE_PERSISTENT_STORES") {
            None => true,
            Some(raw) => raw
                .trim()
                .parse::<bool>()
                .map_err(|e| ConfigError::invalid("USE_PERSISTENT_STORES", format!("{raw:?}: {e}")))?,
        };

        let store = if persistent {
            let database_url = lookup("DATABASE_URL")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
            StoreKind::Sqlite { database_url }
        } else {
            StoreKind::InMemory
        };

        Ok(Self { bind_addr, store })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_to_sqlite_on_8080() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(
            cfg.store,
            StoreKind::Sqlite {
                database_url: DEFAULT_DATABASE_URL.to_string()
            }
        );
    }

    #[test]
    fn port_overrides_bind_port_only() {
        let cfg = load(&[("BIND_ADDR", "127.0.0.1:3000"), ("PORT", "10000")]).unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:10000".parse().unwrap());
    }

    #[test]
    fn in_memory_store_when_not_persistent() {
        let cfg = load(&[("USE_PERSISTENT_STORES", "false"), ("DATABASE_URL", "sqlite://x.db")]).unwrap();
        assert_eq!(cfg.store, StoreKind::InMemory);
    }

    #[test]
    fn custom_database_url() {
        let cfg = load(&[("DATABASE_URL", "sqlite::memory:")]).unwrap();
        assert_eq!(
            cfg.store,
            StoreKind::Sqlite {
                database_url: "sqlite::memory:".to_string()
            }
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            load(&[("BIND_ADDR", "not-an-addr")]),
            Err(ConfigError::Invalid { var: "BIND_ADDR", .. })
        ));
        assert!(matches!(
            load(&[("PORT", "99999")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        ));
        assert!(matches!(
            load(&[("USE_PERSISTENT_STORES", "yes")]),
            Err(ConfigError::Invalid { var: "USE_PERSISTENT_STORES", .. })
        ));
    }
}
