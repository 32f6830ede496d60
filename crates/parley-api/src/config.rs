//! Engine configuration.
//!
//! Configuration can be loaded from:
//! - A TOML configuration file (`parley.toml`)
//! - Environment variables (PARLEY_*)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Broker tuning.
    #[serde(default)]
    pub broker: BrokerConfig,

    /// Channels created at startup.
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Broker tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Per-topic broadcast ring capacity.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

/// Channels replayed through the normal mutations at startup.
///
/// Seeded entities get ordinary allocated ids, so the id counters always
/// resume above them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Seed channels in creation order.
    #[serde(default)]
    pub channels: Vec<SeedChannel>,
}

/// One seeded channel with its initial messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedChannel {
    /// Channel display name.
    pub name: String,

    /// Initial message texts, in append order.
    #[serde(default)]
    pub messages: Vec<String>,
}

// Default value functions
fn default_capacity() -> usize {
    std::env::var("PARLEY_BROKER_CAPACITY")
        .ok()
        .and_then(|c| c.parse().ok())
        .unwrap_or(1024)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            broker: BrokerConfig::default(),
            seed: SeedConfig::default(),
        }
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from `parley.toml` in the working directory if
    /// present, otherwise fall back to defaults with environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let path = Path::new("parley.toml");
        if path.exists() {
            return Self::from_file(path);
        }
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: EngineConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.broker.capacity, 1024);
        assert!(config.seed.channels.is_empty());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            [broker]
            capacity = 64

            [[seed.channels]]
            name = "soccer"
            messages = ["soccer is football", "hello soccer world cup"]

            [[seed.channels]]
            name = "baseball"
        "#;

        let config: EngineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.broker.capacity, 64);
        assert_eq!(config.seed.channels.len(), 2);
        assert_eq!(config.seed.channels[0].name, "soccer");
        assert_eq!(config.seed.channels[0].messages.len(), 2);
        // Messages are optional per seed channel.
        assert!(config.seed.channels[1].messages.is_empty());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config.broker.capacity, 1024);
        assert!(config.seed.channels.is_empty());
    }
}
