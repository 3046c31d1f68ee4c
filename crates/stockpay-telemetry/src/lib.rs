//! Structured logging for stockpay.

pub mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{default_filter, init_logging};
