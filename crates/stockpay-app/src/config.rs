//! Application configuration.
//!
//! Loaded from TOML. Every section is optional; missing sections and keys
//! fall back to the built-in defaults.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use stockpay_feed::{HttpConfig, MarketDataConfig, RateConfig};
use stockpay_wallet::{ChainConfig, TokenConfig};

/// Default config file location.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "STOCKPAY_CONFIG";

/// Wallet provider configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletConfig {
    /// JSON-RPC endpoint of the wallet provider.
    /// If None, no wallet is present and connecting fails.
    #[serde(default)]
    pub provider_url: Option<String>,
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Market-data (unit price) endpoint.
    #[serde(default)]
    pub market_data: MarketDataConfig,
    /// Stablecoin rate endpoint.
    #[serde(default)]
    pub rate: RateConfig,
    /// HTTP client settings shared by the resolvers and the wallet provider.
    #[serde(default)]
    pub http: HttpConfig,
    /// Network the wallet is switched to.
    #[serde(default)]
    pub chain: ChainConfig,
    /// Settlement token and payment recipient.
    #[serde(default)]
    pub token: TokenConfig,
    /// Wallet provider.
    #[serde(default)]
    pub wallet: WalletConfig,
}

impl AppConfig {
    /// Resolve the config path (explicit > env var > default) and load it.
    ///
    /// A missing file at the default location yields the built-in defaults;
    /// a missing file that was asked for explicitly is an error.
    pub fn load(explicit: Option<String>) -> AppResult<Self> {
        let from_env = std::env::var(CONFIG_ENV_VAR).ok();
        let requested = explicit.or(from_env);

        match requested {
            Some(path) => Self::from_file(&path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH),
            None => {
                tracing::warn!(path = DEFAULT_CONFIG_PATH, "Config file not found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config {path}: {e}")))?;

        Self::from_toml(&content)
    }

    /// Parse from TOML text.
    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Whether a wallet provider is configured.
    pub fn has_wallet(&self) -> bool {
        self.wallet.provider_url.is_some()
    }
}
