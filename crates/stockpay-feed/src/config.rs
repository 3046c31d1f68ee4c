//! Endpoint configuration for the resolvers.

use serde::{Deserialize, Serialize};

/// Market-data endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDataConfig {
    /// URL with a `{ticker}` placeholder.
    #[serde(default = "default_url_template")]
    pub url_template: String,
    /// Column of the first `marketdata` row holding the unit price.
    /// Default: 12 (LAST).
    #[serde(default = "default_price_column")]
    pub price_column: usize,
}

fn default_url_template() -> String {
    "https://iss.moex.com/iss/engines/stock/markets/shares/boards/TQBR/securities/{ticker}.json"
        .to_string()
}

fn default_price_column() -> usize {
    12
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            url_template: default_url_template(),
            price_column: default_price_column(),
        }
    }
}

impl MarketDataConfig {
    /// Endpoint URL for a validated ticker.
    pub fn url_for(&self, ticker: &str) -> String {
        self.url_template.replace("{ticker}", ticker)
    }
}

/// Stablecoin rate endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateConfig {
    /// Simple-price endpoint URL (query parameters are appended).
    #[serde(default = "default_rate_url")]
    pub url: String,
    /// Stablecoin id as known to the price feed.
    #[serde(default = "default_stablecoin_id")]
    pub stablecoin_id: String,
    /// Fiat currency code the rate is quoted in.
    #[serde(default = "default_fiat_code")]
    pub fiat_code: String,
}

fn default_rate_url() -> String {
    "https://api.coingecko.com/api/v3/simple/price".to_string()
}

fn default_stablecoin_id() -> String {
    "tether".to_string()
}

fn default_fiat_code() -> String {
    "rub".to_string()
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            url: default_rate_url(),
            stablecoin_id: default_stablecoin_id(),
            fiat_code: default_fiat_code(),
        }
    }
}

/// Shared HTTP client settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds. Unset means requests wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}
