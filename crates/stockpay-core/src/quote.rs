//! Payment calculator.
//!
//! Converts a fiat price for `quantity` units into a stablecoin amount:
//!
//! ```text
//! raw      = unit_price * quantity / rate
//! amount   = ceil(raw) + raw * MARKUP_RATE
//! ```
//!
//! Only the base is rounded up; the markup is taken on the unrounded base
//! and added on top, so the result is generally fractional.

use crate::error::{PaymentError, PaymentResult};
use crate::types::{ExchangeRate, Quantity, Ticker, UnitPrice};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Markup applied on top of the rounded base amount (1%).
pub const MARKUP_RATE: f64 = 0.01;

/// A priced payment, ready to be transferred.
///
/// Held only by the orchestrator; replaced by every new quote and consumed
/// by a successful payment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub ticker: Ticker,
    pub quantity: Quantity,
    pub unit_price: UnitPrice,
    pub exchange_rate: ExchangeRate,
    /// Stablecoin amount to pay, markup included.
    pub computed_amount: f64,
    pub quoted_at: DateTime<Utc>,
}

/// Compute the stablecoin amount from raw figures.
///
/// # Errors
/// `InvalidInput` if `quantity <= 0`, or if `unit_price` / `rate` are not
/// finite positive numbers.
pub fn compute_amount(unit_price: f64, quantity: i64, rate: f64) -> PaymentResult<f64> {
    let quantity = Quantity::new(quantity)?;
    let unit_price = UnitPrice::new(unit_price)?;
    let rate = ExchangeRate::new(rate)?;
    amount_for(unit_price, quantity, rate)
}

fn amount_for(unit_price: UnitPrice, quantity: Quantity, rate: ExchangeRate) -> PaymentResult<f64> {
    let fiat_total = unit_price.value() * quantity.get() as f64;
    let raw_stable = fiat_total / rate.value();
    let amount = raw_stable.ceil() + raw_stable * MARKUP_RATE;

    if !amount.is_finite() {
        return Err(PaymentError::InvalidInput(format!(
            "payment amount overflows for {quantity} x {unit_price} at rate {rate}"
        )));
    }
    Ok(amount)
}

/// Build a [`Quote`] from validated figures.
pub fn compute_quote(
    ticker: Ticker,
    unit_price: UnitPrice,
    quantity: Quantity,
    rate: ExchangeRate,
) -> PaymentResult<Quote> {
    let computed_amount = amount_for(unit_price, quantity, rate)?;
    Ok(Quote {
        ticker,
        quantity,
        unit_price,
        exchange_rate: rate,
        computed_amount,
        quoted_at: Utc::now(),
    })
}
