//! Application configuration

pub mod replies;
pub mod store;

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use replies::{CannedReply, ReplyPool, ReplyPoolError};
pub use store::{AssistantConfig, ConfigError, PricingConfig, StoreConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Optional store TOML file
    pub store_config: Option<PathBuf>,
    /// Fixed seed for canned reply selection
    pub reply_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            store_config: env::var("MOXIE_SHOP_CONFIG").ok().map(PathBuf::from),
            reply_seed: env::var("MOXIE_SHOP_SEED")
                .ok()
                .map(|s| s.parse::<u64>())
                .transpose()?,
        })
    }

    /// Read the store file if one is configured, otherwise use defaults
    pub fn load_store(&self) -> Result<StoreConfig, ConfigError> {
        match &self.store_config {
            Some(path) => StoreConfig::from_file(path),
            None => Ok(StoreConfig::default()),
        }
    }
}
