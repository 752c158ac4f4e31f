//! Storage configuration loaded from the process environment.
//!
//! | variable | meaning | default |
//! |---|---|---|
//! | `USE_PERSISTENT_STORES` | `true` selects Postgres | `false` |
//! | `DATABASE_URL` | Postgres connection string | required when persistent |
//! | `STORAGE_TIMEOUT_MS` | upper bound for a single storage call | `5000` |
//! | `SEED_DEMO_DATA` | fill the in-memory store with demo products | `true` |

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_millis(5_000);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    InMemory { seed_demo_data: bool },
    Postgres { database_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub timeout: Duration,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::InMemory { seed_demo_data: true },
            timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map instead of the
    /// real environment).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let persistent = parse_bool(&lookup, "USE_PERSISTENT_STORES", false)?;

        let backend = if persistent {
            let database_url = lookup("DATABASE_URL")
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;
            StorageBackend::Postgres { database_url }
        } else {
            StorageBackend::InMemory {
                seed_demo_data: parse_bool(&lookup, "SEED_DEMO_DATA", true)?,
            }
        };

        let timeout = match lookup("STORAGE_TIMEOUT_MS") {
            None => DEFAULT_STORAGE_TIMEOUT,
            Some(raw) => {
                let ms: u64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::Invalid {
                        var: "STORAGE_TIMEOUT_MS",
                        value: raw.clone(),
                        reason: e.to_string(),
                    }
                })?;
                if ms == 0 {
                    return Err(ConfigError::Invalid {
                        var: "STORAGE_TIMEOUT_MS",
                        value: raw,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_millis(ms)
            }
        };

        Ok(Self { backend, timeout })
    }
}

fn parse_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: raw,
            reason: "expected true or false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_seeded_in_memory_store() {
        let cfg = StorageConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, StorageConfig::default());
    }

    #[test]
    fn persistent_store_requires_database_url() {
        let err = StorageConfig::from_lookup(lookup(&[("USE_PERSISTENT_STORES", "true")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));

        let cfg = StorageConfig::from_lookup(lookup(&[
            ("USE_PERSISTENT_STORES", "true"),
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("STORAGE_TIMEOUT_MS", "250"),
        ]))
        .unwrap();
        assert_eq!(
            cfg.backend,
            StorageBackend::Postgres {
                database_url: "postgres://localhost/shop".to_string()
            }
        );
        assert_eq!(cfg.timeout, Duration::from_millis(250));
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(matches!(
            StorageConfig::from_lookup(lookup(&[("STORAGE_TIMEOUT_MS", "soon")])),
            Err(ConfigError::Invalid { var: "STORAGE_TIMEOUT_MS", .. })
        ));
        assert!(matches!(
            StorageConfig::from_lookup(lookup(&[("STORAGE_TIMEOUT_MS", "0")])),
            Err(ConfigError::Invalid { var: "STORAGE_TIMEOUT_MS", .. })
        ));
        assert!(matches!(
            StorageConfig::from_lookup(lookup(&[("SEED_DEMO_DATA", "maybe")])),
            Err(ConfigError::Invalid { var: "SEED_DEMO_DATA", .. })
        ));
    }

    #[test]
    fn seeding_can_be_disabled() {
        let cfg = StorageConfig::from_lookup(lookup(&[("SEED_DEMO_DATA", "off")])).unwrap();
        assert_eq!(cfg.backend, StorageBackend::InMemory { seed_demo_data: false });
    }
}
