//! Core domain types for stockpay.
//!
//! This crate provides the pieces of the payment pipeline that need no I/O:
//! - `Ticker`, `Quantity`: validated user input
//! - `UnitPrice`, `ExchangeRate`: validated external figures
//! - `Quote` and the payment calculator (`compute_quote`)
//! - `TokenAmount`: stablecoin amount in smallest units
//! - `PaymentError`: the error taxonomy shared by every stage

pub mod amount;
pub mod error;
pub mod quote;
pub mod types;

pub use amount::{TokenAmount, TOKEN_DECIMALS};
pub use error::{PaymentError, PaymentResult};
pub use quote::{compute_amount, compute_quote, Quote, MARKUP_RATE};
pub use types::{ExchangeRate, Quantity, Ticker, UnitPrice};
