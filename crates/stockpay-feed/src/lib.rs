//! Price and rate lookups for stockpay.
//!
//! Two independent resolvers feed the payment calculator:
//! - [`MoexPriceResolver`]: unit price of a ticker from the exchange's
//!   securities endpoint
//! - [`CoinGeckoRateResolver`]: fiat price of one stablecoin
//!
//! Both sit behind object-safe traits ([`PriceSource`], [`RateSource`]) so the
//! orchestrator can be driven by test doubles. Any transport failure, non-2xx
//! status or unexpected response shape is reported as
//! `PaymentError::DataUnavailable`. There is no retry.

pub mod config;
pub mod http;
pub mod market_data;
pub mod rate;
pub mod source;

pub use config::{HttpConfig, MarketDataConfig, RateConfig};
pub use http::build_http_client;
pub use market_data::{parse_unit_price, MoexPriceResolver};
pub use rate::{parse_rate, CoinGeckoRateResolver};
pub use source::{BoxFuture, DynPriceSource, DynRateSource, PriceSource, RateSource};
