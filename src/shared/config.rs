/// Runtime configuration read from the environment (and `.env` when present)
use crate::shared::errors::{AppError, AppResult};

pub const DATABASE_URL_VAR: &str = "CATALOG_DATABASE_URL";
pub const POOL_SIZE_VAR: &str = "CATALOG_POOL_SIZE";

const DEFAULT_DATABASE_URL: &str = "catalog.db";
const DEFAULT_POOL_SIZE: u32 = 8;
const MAX_POOL_SIZE: u32 = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database path, or `:memory:`
    pub database_url: String,
    pub pool_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_VAR)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        if database_url.starts_with("postgres://") || database_url.starts_with("mysql://") {
            return Err(AppError::ConfigError(format!(
                "{} must point at a SQLite file or :memory:",
                DATABASE_URL_VAR
            )));
        }

        let pool_size = match lookup(POOL_SIZE_VAR) {
            None => DEFAULT_POOL_SIZE,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|size| (1..=MAX_POOL_SIZE).contains(size))
                .ok_or_else(|| {
                    AppError::ConfigError(format!(
                        "{} must be an integer between 1 and {}, got '{}'",
                        POOL_SIZE_VAR, MAX_POOL_SIZE, raw
                    ))
                })?,
        };

        // Every connection to :memory: opens a separate database
        let pool_size = if database_url == ":memory:" { 1 } else { pool_size };

        Ok(Self {
            database_url,
            pool_size,
        })
    }

    pub fn in_memory() -> Self {
        Self {
            database_url: ":memory:".to_string(),
            pool_size: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_explicit_values() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (DATABASE_URL_VAR, "/var/lib/catalog/players.db"),
            (POOL_SIZE_VAR, "4"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "/var/lib/catalog/players.db");
        assert_eq!(config.pool_size, 4);
    }

    #[test]
    fn test_memory_database_uses_single_connection() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (DATABASE_URL_VAR, ":memory:"),
            (POOL_SIZE_VAR, "16"),
        ]))
        .unwrap();
        assert_eq!(config.pool_size, 1);
    }

    #[test]
    fn test_invalid_pool_size() {
        for raw in ["0", "65", "lots"] {
            let err = AppConfig::from_lookup(lookup_from(&[(POOL_SIZE_VAR, raw)])).unwrap_err();
            assert!(matches!(err, AppError::ConfigError(ref msg) if msg.contains(POOL_SIZE_VAR)));
        }
    }

    #[test]
    fn test_rejects_server_urls() {
        let err = AppConfig::from_lookup(lookup_from(&[(
            DATABASE_URL_VAR,
            "postgres://user@localhost/catalog",
        )]))
        .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }
}
