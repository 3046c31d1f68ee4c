//! Validated input and market figures.
//!
//! Every type here is constructed through a checking constructor, so a value
//! that exists is usable by the calculator without further validation.

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Instrument code, e.g. "SBER".
///
/// One or more ASCII letters, case preserved. Surrounding whitespace is
/// trimmed before validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Parse and validate a ticker.
    pub fn parse(raw: &str) -> PaymentResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PaymentError::InvalidInput(
                "ticker must not be empty".to_string(),
            ));
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PaymentError::InvalidInput(format!(
                "ticker must contain only letters, got {trimmed:?}"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = PaymentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

/// Number of units to price. Always > 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Quantity(i64);

impl Quantity {
    pub fn new(value: i64) -> PaymentResult<Self> {
        if value <= 0 {
            return Err(PaymentError::InvalidInput(format!(
                "quantity must be a positive number, got {value}"
            )));
        }
        Ok(Self(value))
    }

    #[inline]
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Quantity {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: i64 = trimmed.parse().map_err(|_| {
            PaymentError::InvalidInput(format!(
                "quantity must be a positive number, got {trimmed:?}"
            ))
        })?;
        Self::new(value)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = PaymentError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for i64 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

fn check_positive_finite(what: &str, value: f64) -> PaymentResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PaymentError::InvalidInput(format!(
            "{what} must be a finite positive number, got {value}"
        )));
    }
    Ok(value)
}

/// Fiat price per unit of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct UnitPrice(f64);

impl UnitPrice {
    pub fn new(value: f64) -> PaymentResult<Self> {
        check_positive_finite("unit price", value).map(Self)
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fiat units per one stablecoin.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ExchangeRate(f64);

impl ExchangeRate {
    pub fn new(value: f64) -> PaymentResult<Self> {
        check_positive_finite("exchange rate", value).map(Self)
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_accepts_letters_any_case() {
        for raw in ["SBER", "sber", "SbEr", "A"] {
            let ticker = Ticker::parse(raw).unwrap();
            assert_eq!(ticker.as_str(), raw);
        }
    }

    #[test]
    fn test_ticker_trims_whitespace() {
        let ticker = Ticker::parse("  GAZP\n").unwrap();
        assert_eq!(ticker.as_str(), "GAZP");
    }

    #[test]
    fn test_ticker_rejects_non_letters() {
        for raw in ["AAPL1", "BRK.B", "SB ER", "", "   ", "ЛУКОЙЛ", "X-Y"] {
            let err = Ticker::parse(raw).unwrap_err();
            assert!(
                matches!(err, PaymentError::InvalidInput(_)),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_ticker_deserialize_validates() {
        let ok: Ticker = serde_json::from_str(r#""LKOH""#).unwrap();
        assert_eq!(ok.to_string(), "LKOH");
        assert!(serde_json::from_str::<Ticker>(r#""LK0H""#).is_err());
    }

    #[test]
    fn test_quantity_parse() {
        assert_eq!("10".parse::<Quantity>().unwrap().get(), 10);
        assert_eq!(" 3 ".parse::<Quantity>().unwrap().get(), 3);
    }

    #[test]
    fn test_quantity_rejects_non_positive_and_garbage() {
        for raw in ["0", "-1", "abc", "", "1.5", "10abc"] {
            assert!(
                matches!(
                    raw.parse::<Quantity>(),
                    Err(PaymentError::InvalidInput(_))
                ),
                "{raw:?} should be rejected"
            );
        }
        assert!(Quantity::new(0).is_err());
        assert!(Quantity::new(-7).is_err());
    }

    #[test]
    fn test_unit_price_and_rate_validation() {
        assert!(UnitPrice::new(250.0).is_ok());
        assert!(UnitPrice::new(0.0).is_err());
        assert!(UnitPrice::new(-1.0).is_err());
        assert!(UnitPrice::new(f64::NAN).is_err());
        assert!(UnitPrice::new(f64::INFINITY).is_err());

        assert!(ExchangeRate::new(95.5).is_ok());
        assert!(ExchangeRate::new(0.0).is_err());
        assert!(ExchangeRate::new(f64::NEG_INFINITY).is_err());
    }
}
