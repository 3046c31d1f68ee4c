//! Resolver traits.

use std::pin::Pin;
use std::sync::Arc;

use stockpay_core::{ExchangeRate, PaymentResult, Ticker, UnitPrice};

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Source of per-unit instrument prices.
pub trait PriceSource: Send + Sync {
    /// Fetch the current unit price for `ticker`.
    fn resolve_price<'a>(&'a self, ticker: &'a Ticker) -> BoxFuture<'a, PaymentResult<UnitPrice>>;
}

/// Source of the fiat-per-stablecoin rate.
pub trait RateSource: Send + Sync {
    /// Fetch the current stablecoin rate.
    fn resolve_stablecoin_rate(&self) -> BoxFuture<'_, PaymentResult<ExchangeRate>>;
}

/// Arc wrapper for PriceSource trait objects.
pub type DynPriceSource = Arc<dyn PriceSource>;

/// Arc wrapper for RateSource trait objects.
pub type DynRateSource = Arc<dyn RateSource>;
