//! Stablecoin amount in the token's smallest unit.
//!
//! The token uses 6 decimals. Amounts are rounded half away from zero to
//! 6 fractional digits before conversion, so `27.2617801` becomes
//! `27261780` base units.

use crate::error::{PaymentError, PaymentResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal places of the settlement token.
pub const TOKEN_DECIMALS: u32 = 6;

const SCALE: f64 = 1_000_000.0;

/// Token amount in base units (1 token = 10^6 base units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAmount(u64);

impl TokenAmount {
    /// Convert a stablecoin amount into base units.
    ///
    /// # Errors
    /// `InvalidAmount` if `amount` is not finite, not positive, or too large
    /// to represent.
    pub fn from_stable(amount: f64) -> PaymentResult<Self> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(PaymentError::InvalidAmount(format!(
                "amount must be a finite positive number, got {amount}"
            )));
        }

        let scaled = (amount * SCALE).round();
        if scaled >= u64::MAX as f64 {
            return Err(PaymentError::InvalidAmount(format!(
                "amount {amount} is too large"
            )));
        }
        Ok(Self(scaled as u64))
    }

    #[inline]
    pub fn from_base_units(units: u64) -> Self {
        Self(units)
    }

    #[inline]
    pub fn base_units(&self) -> u64 {
        self.0
    }

    /// Exact decimal value in whole tokens.
    #[inline]
    pub fn as_decimal(&self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.0), TOKEN_DECIMALS)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_decimal().normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rounds_to_six_decimals() {
        let amount = TokenAmount::from_stable(27.261_780_104_712).unwrap();
        assert_eq!(amount.base_units(), 27_261_780);
        assert_eq!(amount.as_decimal(), dec!(27.261780));
    }

    #[test]
    fn test_rounds_to_nearest_base_unit() {
        assert_eq!(TokenAmount::from_stable(0.000_001_6).unwrap().base_units(), 2);
        assert_eq!(TokenAmount::from_stable(0.000_001_4).unwrap().base_units(), 1);
        assert_eq!(TokenAmount::from_stable(1.000_001_4).unwrap().base_units(), 1_000_001);
    }

    #[test]
    fn test_whole_amount() {
        let amount = TokenAmount::from_stable(4.04).unwrap();
        assert_eq!(amount.base_units(), 4_040_000);
        assert_eq!(amount.to_string(), "4.04");
    }

    #[test]
    fn test_rejects_invalid() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e30] {
            assert!(
                matches!(
                    TokenAmount::from_stable(bad),
                    Err(PaymentError::InvalidAmount(_))
                ),
                "{bad} should be rejected"
            );
        }
    }
}
