use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("BCRYPT_COST must be between 4 and 31, got {0}")]
    CostOutOfRange(u32),
}

/// Where documents are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    MongoDb,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(Self::MongoDb),
            "memory" => Ok(Self::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
    pub storage: StorageBackend,
    pub seed_database: bool,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source. Unset variables take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let port = parse_var("SERVER_PORT", get("SERVER_PORT", "8080"))?;
        let storage = parse_var("STORAGE_BACKEND", get("STORAGE_BACKEND", "mongodb"))?;
        let seed_database = parse_bool("SEED_DATABASE", get("SEED_DATABASE", "true"))?;

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(raw) => parse_var("BCRYPT_COST", raw)?,
            None => bcrypt::DEFAULT_COST,
        };
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::CostOutOfRange(bcrypt_cost));
        }

        let cors_origins = get("CORS_ALLOWED_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host: get("SERVER_HOST", "127.0.0.1"),
            port,
            mongodb_uri: get("MONGODB_URI", "mongodb://localhost:27017"),
            database_name: get("DATABASE_NAME", "course-api"),
            storage,
            seed_database,
            bcrypt_cost,
            cors_origins,
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

fn parse_bool(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.mongodb_uri, "mongodb://localhost:27017");
        assert_eq!(config.database_name, "course-api");
        assert_eq!(config.storage, StorageBackend::MongoDb);
        assert!(config.seed_database);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SERVER_PORT", "9000"),
            ("STORAGE_BACKEND", "Memory"),
            ("SEED_DATABASE", "false"),
            ("BCRYPT_COST", "4"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test,"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert!(!config.seed_database);
        assert_eq!(config.bcrypt_cost, 4);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            config_from(&[("SERVER_PORT", "eighty")]).unwrap_err(),
            ConfigError::Invalid {
                name: "SERVER_PORT",
                value: "eighty".to_string()
            }
        );
        assert!(matches!(
            config_from(&[("STORAGE_BACKEND", "postgres")]),
            Err(ConfigError::Invalid { name: "STORAGE_BACKEND", .. })
        ));
        assert!(matches!(
            config_from(&[("SEED_DATABASE", "maybe")]),
            Err(ConfigError::Invalid { name: "SEED_DATABASE", .. })
        ));
        assert_eq!(
            config_from(&[("BCRYPT_COST", "3")]).unwrap_err(),
            ConfigError::CostOutOfRange(3)
        );
    }
}
