use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    pub store: StoreConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Directory holding `allergens.json`, `locations.json`, `meals.json`
    /// and `last-update.json`, optionally overridden per scope subdirectory.
    pub dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub path: String,
    /// Persisted state written under another version is discarded.
    pub schema_version: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SessionConfig {
    /// Scope used until the user selects one.
    #[serde(default)]
    pub default_scope: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MENSAPLAN__STORE__PATH, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("data.dir", "data")?
            .set_default("store.path", "mensaplan.json")?
            .set_default("store.schema_version", "3")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored when missing
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MENSAPLAN")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.data.dir.trim().is_empty() {
            return Err("Data directory must not be empty".to_string());
        }
        if self.store.path.trim().is_empty() {
            return Err("Store path must not be empty".to_string());
        }
        if self.store.schema_version.trim().is_empty() {
            return Err("Store schema version must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            data: DataConfig {
                dir: "data".to_string(),
            },
            store: StoreConfig {
                path: "mensaplan.json".to_string(),
                schema_version: "3".to_string(),
            },
            session: SessionConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn test_validation_accepts_defaults() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_store_path() {
        let mut config = config();
        config.store.path = " ".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_schema_version() {
        let mut config = config();
        config.store.schema_version = String::new();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_data_dir() {
        let mut config = config();
        config.data.dir = String::new();

        assert!(config.validate().is_err());
    }
}
