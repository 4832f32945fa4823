use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mealpick_mealplan::PickerConfig;
use mealpick_shared::{DEFAULT_MEAL_TIMES, MealTime};
use serde::Deserialize;
use std::env;
use strum::{AsRefStr, Display, EnumString};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub store: StoreConfig,
    #[serde(default)]
    pub planner: PickerConfig,
    #[serde(default = "default_meal_times")]
    pub meal_times: Vec<MealTime>,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StoreKind {
    /// In-process store seeded with the demo catalog on every run
    Memory,
    Sqlite,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub kind: StoreKind,
    pub url: String,
    pub max_connections: u32,
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
    "info".to_string()
}

fn default_meal_times() -> Vec<MealTime> {
    DEFAULT_MEAL_TIMES.to_vec()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALPICK__STORE__URL, MEALPICK__PLANNER__WEIGHTS__BASE, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("store.kind", "sqlite")?
            .set_default("store.url", "sqlite:mealpick.db")?
            .set_default("store.max_connections", 5)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALPICK")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("store.url", database_url)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.store.kind == StoreKind::Sqlite && self.store.url.is_empty() {
            return Err("Store url is required for the sqlite store".to_string());
        }
        if self.store.max_connections < 1 {
            return Err("Store max_connections must be at least 1".to_string());
        }
        if self.meal_times.is_empty() {
            return Err("At least one meal time must be configured".to_string());
        }
        self.planner.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            store: StoreConfig {
                kind: StoreKind::Sqlite,
                url: "sqlite:test.db".to_string(),
                max_connections: 5,
            },
            planner: PickerConfig::default(),
            meal_times: default_meal_times(),
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn test_validation_defaults() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_sqlite_url() {
        let mut config = config();
        config.store.url = String::new();

        assert!(config.validate().is_err());

        config.store.kind = StoreKind::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_connections() {
        let mut config = config();
        config.store.max_connections = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_no_meal_times() {
        let mut config = config();
        config.meal_times.clear();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_planner() {
        let mut config = config();
        config.planner.weights.noise_span = -1.0;

        assert!(config.validate().is_err());
    }
}
