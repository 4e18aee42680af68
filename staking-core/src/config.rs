//! Configuration for the staking engine

use serde::{Deserialize, Serialize};

/// Engine configuration
///
/// The reward rate is fixed for the lifetime of an engine instance;
/// there is no post-construction rate governance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Reward-token wei accrued per staked token per hour
    pub reward_rate_per_hour: u64,

    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reward_rate_per_hour: 100_000,
            service_name: "staking-core".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(rate) = std::env::var("STAKING_REWARD_RATE_PER_HOUR") {
            config.reward_rate_per_hour = rate
                .parse()
                .map_err(|e| crate::Error::Config(format!("Invalid reward rate: {}", e)))?;
        }

        if let Ok(name) = std::env::var("STAKING_SERVICE_NAME") {
            config.service_name = name;
        }

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.reward_rate_per_hour == 0 {
            return Err(crate::Error::Config(
                "reward_rate_per_hour must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
