//! Stablecoin rate lookup from a simple-price feed.
//!
//! Response shape: `{"<stablecoin-id>": {"<fiat-code>": <rate>}}`.

use std::collections::HashMap;

use reqwest::Client;
use stockpay_core::{ExchangeRate, PaymentError, PaymentResult};
use tracing::{debug, info};

use crate::config::RateConfig;
use crate::http::fetch_body;
use crate::source::{BoxFuture, RateSource};

type SimplePriceResponse = HashMap<String, HashMap<String, serde_json::Value>>;

/// Extract the `stablecoin_id` / `fiat_code` rate from a response body.
///
/// # Errors
/// `DataUnavailable` if either key is missing, the value is not a number,
/// or the number is not a finite positive rate.
pub fn parse_rate(body: &str, stablecoin_id: &str, fiat_code: &str) -> PaymentResult<ExchangeRate> {
    let unavailable = |reason: String| {
        PaymentError::DataUnavailable(format!(
            "no {stablecoin_id}/{fiat_code} rate: {reason}"
        ))
    };

    let response: SimplePriceResponse = serde_json::from_str(body)
        .map_err(|e| unavailable(format!("unexpected response shape: {e}")))?;

    let value = response
        .get(stablecoin_id)
        .and_then(|quotes| quotes.get(fiat_code))
        .ok_or_else(|| unavailable("missing from response".to_string()))?;

    let rate = value
        .as_f64()
        .ok_or_else(|| unavailable(format!("not a number: {value}")))?;

    ExchangeRate::new(rate).map_err(|e| unavailable(e.to_string()))
}

/// Rate resolver backed by a simple-price endpoint.
pub struct CoinGeckoRateResolver {
    client: Client,
    config: RateConfig,
}

impl CoinGeckoRateResolver {
    pub fn new(client: Client, config: RateConfig) -> Self {
        Self { client, config }
    }

    /// Fetch the current fiat price of one stablecoin.
    pub async fn fetch_rate(&self) -> PaymentResult<ExchangeRate> {
        let RateConfig {
            url,
            stablecoin_id,
            fiat_code,
        } = &self.config;
        info!(url = %url, stablecoin = %stablecoin_id, fiat = %fiat_code, "Fetching stablecoin rate");

        let request = self
            .client
            .get(url)
            .query(&[("ids", stablecoin_id), ("vs_currencies", fiat_code)]);
        let body = fetch_body(request, &format!("{stablecoin_id} rate")).await?;
        let rate = parse_rate(&body, stablecoin_id, fiat_code)?;

        debug!(rate = rate.value(), "Stablecoin rate resolved");
        Ok(rate)
    }
}

impl RateSource for CoinGeckoRateResolver {
    fn resolve_stablecoin_rate(&self) -> BoxFuture<'_, PaymentResult<ExchangeRate>> {
        Box::pin(self.fetch_rate())
    }
}
