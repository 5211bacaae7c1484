//! Store configuration loaded from TOML files
//!
//! Everything has a default, so an empty file (or no file at all) gives the
//! stock behaviour:
//! - 8% tax, free shipping above $1000, otherwise a $29 fee
//! - widget replies after 1000ms, assistant page replies after 1500ms

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::money::Money;

/// Root store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store information
    #[serde(default)]
    pub store: StoreInfo,

    /// Cart pricing rules
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Simulated assistant settings
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl StoreConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let pricing = &self.pricing;
        if !pricing.tax_rate.is_finite() || !(0.0..1.0).contains(&pricing.tax_rate) {
            return Err(ConfigError::Validation(format!(
                "tax_rate must be in [0, 1), got {}",
                pricing.tax_rate
            )));
        }
        for (name, amount) in [
            ("free_shipping_over", pricing.free_shipping_over),
            ("shipping_fee", pricing.shipping_fee),
        ] {
            if !amount.is_finite() || !(0.0..=MAX_AMOUNT).contains(&amount) {
                return Err(ConfigError::Validation(format!(
                    "pricing.{} must be between 0 and {}, got {}",
                    name, MAX_AMOUNT, amount
                )));
            }
        }

        for (name, screen) in [("widget", &self.assistant.widget), ("page", &self.assistant.page)] {
            if !(1..=MAX_REPLY_DELAY_MS).contains(&screen.reply_delay_ms) {
                return Err(ConfigError::Validation(format!(
                    "assistant.{}.reply_delay_ms must be between 1 and {}",
                    name, MAX_REPLY_DELAY_MS
                )));
            }
        }

        Ok(())
    }
}

const MAX_REPLY_DELAY_MS: u64 = 10_000;

/// Largest configurable dollar amount
const MAX_AMOUNT: f64 = 1_000_000.0;

/// Store identification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreInfo {
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "Moxie Shop".to_string()
}

impl Default for StoreInfo {
    fn default() -> Self {
        Self {
            name: default_store_name(),
        }
    }
}

/// Tax and shipping rules applied to the cart summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,

    /// Shipping is waived when the subtotal is strictly above this amount
    #[serde(default = "default_free_shipping_over")]
    pub free_shipping_over: f64,

    #[serde(default = "default_shipping_fee")]
    pub shipping_fee: f64,
}

fn default_tax_rate() -> f64 {
    0.08
}

fn default_free_shipping_over() -> f64 {
    1000.0
}

fn default_shipping_fee() -> f64 {
    29.0
}

impl PricingConfig {
    pub fn free_shipping_threshold(&self) -> Money {
        Money::from_f64(self.free_shipping_over)
    }

    pub fn shipping_fee(&self) -> Money {
        Money::from_f64(self.shipping_fee)
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
            free_shipping_over: default_free_shipping_over(),
            shipping_fee: default_shipping_fee(),
        }
    }
}

/// Per-screen assistant settings
///
/// A screen table may set any subset of its keys; a missing delay falls back
/// to that screen's own default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawAssistantConfig")]
pub struct AssistantConfig {
    pub widget: ChatScreenConfig,
    pub page: ChatScreenConfig,
}

#[derive(Debug, Default, Deserialize)]
struct RawAssistantConfig {
    #[serde(default)]
    widget: RawScreenConfig,
    #[serde(default)]
    page: RawScreenConfig,
}

#[derive(Debug, Default, Deserialize)]
struct RawScreenConfig {
    reply_delay_ms: Option<u64>,
    replies_file: Option<PathBuf>,
}

impl RawScreenConfig {
    fn resolve(self, default: ChatScreenConfig) -> ChatScreenConfig {
        ChatScreenConfig {
            reply_delay_ms: self.reply_delay_ms.unwrap_or(default.reply_delay_ms),
            replies_file: self.replies_file.or(default.replies_file),
        }
    }
}

impl From<RawAssistantConfig> for AssistantConfig {
    fn from(raw: RawAssistantConfig) -> Self {
        Self {
            widget: raw.widget.resolve(default_widget()),
            page: raw.page.resolve(default_page()),
        }
    }
}

fn default_widget() -> ChatScreenConfig {
    ChatScreenConfig::with_delay(1000)
}

fn default_page() -> ChatScreenConfig {
    ChatScreenConfig::with_delay(1500)
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            widget: default_widget(),
            page: default_page(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatScreenConfig {
    /// Fixed delay before the canned reply is appended
    pub reply_delay_ms: u64,

    /// Optional reply pool file replacing the built-in replies
    pub replies_file: Option<PathBuf>,
}

impl ChatScreenConfig {
    fn with_delay(reply_delay_ms: u64) -> Self {
        Self {
            reply_delay_ms,
            replies_file: None,
        }
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}
