//! Unit price lookup from the exchange securities endpoint.
//!
//! The endpoint answers with column/row tables; the price lives in the first
//! row of the `marketdata` table:
//!
//! ```json
//! {"marketdata": {"columns": ["SECID", ..., "LAST", ...], "data": [["SBER", ..., 250.0, ...]]}}
//! ```

use reqwest::Client;
use serde::Deserialize;
use stockpay_core::{PaymentError, PaymentResult, Ticker, UnitPrice};
use tracing::{debug, info};

use crate::config::MarketDataConfig;
use crate::http::fetch_body;
use crate::source::{BoxFuture, PriceSource};

/// Securities endpoint response (only the table we read).
#[derive(Debug, Deserialize)]
struct SecuritiesResponse {
    marketdata: MarketDataTable,
}

#[derive(Debug, Deserialize)]
struct MarketDataTable {
    #[serde(default)]
    columns: Vec<String>,
    data: Vec<Vec<serde_json::Value>>,
}

/// Extract the unit price for `ticker` from a securities response body.
///
/// # Errors
/// `DataUnavailable` if the body is not the expected shape, the table has no
/// rows, the price cell is missing or not a number, or the number is not a
/// finite positive price.
pub fn parse_unit_price(body: &str, price_column: usize, ticker: &Ticker) -> PaymentResult<UnitPrice> {
    let unavailable =
        |reason: String| PaymentError::DataUnavailable(format!("no price for {ticker}: {reason}"));

    let response: SecuritiesResponse = serde_json::from_str(body)
        .map_err(|e| unavailable(format!("unexpected response shape: {e}")))?;
    let table = response.marketdata;

    let row = table
        .data
        .first()
        .ok_or_else(|| unavailable("marketdata has no rows".to_string()))?;

    let cell = row
        .get(price_column)
        .ok_or_else(|| unavailable(format!("row has no column {price_column}")))?;

    let column_name = table
        .columns
        .get(price_column)
        .map(String::as_str)
        .unwrap_or("?");

    let value = cell.as_f64().ok_or_else(|| {
        unavailable(format!("column {column_name} is not a number: {cell}"))
    })?;

    UnitPrice::new(value).map_err(|e| unavailable(e.to_string()))
}

/// Price resolver backed by the exchange's securities endpoint.
pub struct MoexPriceResolver {
    client: Client,
    config: MarketDataConfig,
}

impl MoexPriceResolver {
    pub fn new(client: Client, config: MarketDataConfig) -> Self {
        Self { client, config }
    }

    /// Fetch the unit price for `ticker`.
    pub async fn fetch_price(&self, ticker: &Ticker) -> PaymentResult<UnitPrice> {
        let url = self.config.url_for(ticker.as_str());
        info!(%ticker, url = %url, "Fetching unit price");

        let body = fetch_body(self.client.get(&url), &format!("market data for {ticker}")).await?;
        let price = parse_unit_price(&body, self.config.price_column, ticker)?;

        debug!(%ticker, price = price.value(), "Unit price resolved");
        Ok(price)
    }
}

impl PriceSource for MoexPriceResolver {
    fn resolve_price<'a>(&'a self, ticker: &'a Ticker) -> BoxFuture<'a, PaymentResult<UnitPrice>> {
        Box::pin(self.fetch_price(ticker))
    }
}
