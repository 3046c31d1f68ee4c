//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Wallet configuration error: {0}")]
    WalletConfig(#[from] stockpay_wallet::WalletConfigError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] stockpay_telemetry::TelemetryError),
}

pub type AppResult<T> = Result<T, AppError>;
