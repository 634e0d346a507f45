use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILE: &str = "storage.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub container_capacity: f32,
    pub storage_capacity: f32,
    #[serde(default = "default_shipment_interval_secs")]
    pub shipment_interval_secs: u64,
    #[serde(default = "default_max_shipment")]
    pub max_shipment: f32,
}

fn default_shipment_interval_secs() -> u64 {
    5
}

fn default_max_shipment() -> f32 {
    15.0
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            container_capacity: 10.0,
            storage_capacity: 20.0,
            shipment_interval_secs: default_shipment_interval_secs(),
            max_shipment: default_max_shipment(),
        }
    }
}

impl StorageConfig {
    /// Reads the config at `path`, falling back to defaults when it is absent.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content)
                .with_context(|| format!("invalid config in {}", path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn shipment_interval(&self) -> Duration {
        Duration::from_secs(self.shipment_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = StorageConfig::load("does-not-exist.ron").expect("defaults");
        assert_eq!(config, StorageConfig::default());
    }

    #[test]
    fn optional_fields_fall_back() {
        let config = StorageConfig::parse("(container_capacity: 4.5, storage_capacity: 9.0)")
            .expect("valid config");
        assert_eq!(config.container_capacity, 4.5);
        assert_eq!(config.storage_capacity, 9.0);
        assert_eq!(config.shipment_interval_secs, 5);
        assert_eq!(config.max_shipment, 15.0);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(StorageConfig::parse("(container_capacity: \"ten\")").is_err());
    }

    #[test]
    fn interval_is_at_least_one_second() {
        let config = StorageConfig {
            shipment_interval_secs: 0,
            ..StorageConfig::default()
        };
        assert_eq!(config.shipment_interval(), Duration::from_secs(1));
    }
}
