//! Error taxonomy for the payment pipeline.

use thiserror::Error;

/// Failure kinds surfaced by every pipeline stage.
///
/// Each variant carries the human-readable message shown to the user.
/// None of them is fatal; the caller may retry the failed operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// Bad ticker, quantity or figure, detected before any external call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No wallet provider present, or it could not hand out an account.
    #[error("Wallet unavailable: {0}")]
    WalletUnavailable(String),

    /// The wallet reported that the user denied the request.
    #[error("Request rejected by user: {0}")]
    UserRejected(String),

    /// The add/switch network request errored.
    #[error("Network switch failed: {0}")]
    NetworkSwitchFailed(String),

    /// Market-data or rate lookup failed or returned an unexpected shape.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// Payment amount is not a finite positive number.
    #[error("Invalid transaction amount: {0}")]
    InvalidAmount(String),

    /// The wallet refused the transfer call.
    #[error("Transaction submission failed: {0}")]
    SubmissionFailed(String),

    /// Quote or pay requested before a wallet session exists.
    #[error("Wallet not connected")]
    NotConnected,

    /// Pay requested without a current quote.
    #[error("No active quote to pay")]
    NoActiveQuote,
}

impl PaymentError {
    /// Short stable name of the failure kind, for structured logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::WalletUnavailable(_) => "wallet_unavailable",
            Self::UserRejected(_) => "user_rejected",
            Self::NetworkSwitchFailed(_) => "network_switch_failed",
            Self::DataUnavailable(_) => "data_unavailable",
            Self::InvalidAmount(_) => "invalid_amount",
            Self::SubmissionFailed(_) => "submission_failed",
            Self::NotConnected => "not_connected",
            Self::NoActiveQuote => "no_active_quote",
        }
    }
}

/// Result type alias for pipeline operations.
pub type PaymentResult<T> = Result<T, PaymentError>;
