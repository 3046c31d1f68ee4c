//! ERC-20 transfer submission.
//!
//! The quote amount is rounded to 6 decimals, converted to base units and
//! sent as `transfer(recipient, value)` to the token contract via
//! `eth_sendTransaction` from the session account. The returned handle is the
//! identifier the wallet reported at submission time; confirmation is not
//! tracked and no balance check precedes the call.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::{Address, B256, U256};
use alloy::sol;
use alloy::sol_types::SolCall;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use stockpay_core::{PaymentError, PaymentResult, Quote, TokenAmount};
use tracing::{info, warn};

use crate::error::WalletConfigError;
use crate::session::WalletSession;

sol! {
    interface IERC20 {
        function transfer(address to, uint256 value) external returns (bool);
    }
}

/// Settlement token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Token contract address.
    #[serde(default = "default_contract")]
    pub contract: String,
    /// Fixed payment recipient.
    #[serde(default = "default_recipient")]
    pub recipient: String,
    /// Display symbol.
    #[serde(default = "default_symbol")]
    pub symbol: String,
}

fn default_contract() -> String {
    "0xdAC17F958D2ee523a2206206994597C13D831ec7".to_string()
}

fn default_recipient() -> String {
    "0x8FD369E715C95f5B623A353a010b4c6BBF639991".to_string()
}

fn default_symbol() -> String {
    "USDT".to_string()
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            contract: default_contract(),
            recipient: default_recipient(),
            symbol: default_symbol(),
        }
    }
}

fn parse_address(field: &'static str, value: &str) -> Result<Address, WalletConfigError> {
    Address::from_str(value.trim()).map_err(|e| WalletConfigError::InvalidAddress {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Identifier of a submitted transfer, as returned by the wallet.
///
/// Normally a 32-byte transaction hash, but kept verbatim when the wallet
/// answers with something else: the transfer was accepted either way.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionHandle {
    Hash(B256),
    Opaque(String),
}

impl TransactionHandle {
    /// Interpret a successful `eth_sendTransaction` result.
    pub fn from_result(result: &Value) -> Self {
        match result.as_str() {
            Some(s) => B256::from_str(s)
                .map(Self::Hash)
                .unwrap_or_else(|_| Self::Opaque(s.to_string())),
            None => Self::Opaque(result.to_string()),
        }
    }

    /// The transaction hash, if the wallet returned a well-formed one.
    pub fn hash(&self) -> Option<B256> {
        match self {
            Self::Hash(hash) => Some(*hash),
            Self::Opaque(_) => None,
        }
    }
}

impl fmt::Display for TransactionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hash(hash) => write!(f, "{hash}"),
            Self::Opaque(id) => f.write_str(id),
        }
    }
}

/// An accepted transfer: what was sent and what the wallet returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedTransfer {
    pub tx: TransactionHandle,
    pub request: TransferRequest,
}

/// One payment attempt. Built fresh per `submit_transfer` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub from: Address,
    pub token_contract: Address,
    pub recipient: Address,
    pub amount: TokenAmount,
}

impl TransferRequest {
    /// ABI-encoded `transfer(recipient, amount)` call.
    pub fn calldata(&self) -> Vec<u8> {
        IERC20::transferCall {
            to: self.recipient,
            value: U256::from(self.amount.base_units()),
        }
        .abi_encode()
    }

    /// `eth_sendTransaction` transaction object.
    pub fn to_transaction(&self) -> Value {
        json!({
            "from": self.from.to_string(),
            "to": self.token_contract.to_string(),
            "data": format!("0x{}", hex::encode(self.calldata())),
        })
    }
}

/// Submits token transfers through the session's wallet.
#[derive(Debug, Clone)]
pub struct TransferExecutor {
    token_contract: Address,
    recipient: Address,
    symbol: String,
}

impl TransferExecutor {
    pub fn new(token_contract: Address, recipient: Address, symbol: impl Into<String>) -> Self {
        Self {
            token_contract,
            recipient,
            symbol: symbol.into(),
        }
    }

    /// Validate the configured addresses.
    pub fn from_config(config: &TokenConfig) -> Result<Self, WalletConfigError> {
        Ok(Self::new(
            parse_address("token contract", &config.contract)?,
            parse_address("recipient", &config.recipient)?,
            config.symbol.clone(),
        ))
    }

    /// Symbol of the settlement token.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Build the transfer request for `quote` from `session`'s account.
    ///
    /// # Errors
    /// `InvalidAmount` if the quote amount is not a finite positive number.
    pub fn prepare(&self, session: &WalletSession, quote: &Quote) -> PaymentResult<TransferRequest> {
        let amount = TokenAmount::from_stable(quote.computed_amount)?;
        Ok(TransferRequest {
            from: session.account(),
            token_contract: self.token_contract,
            recipient: self.recipient,
            amount,
        })
    }

    /// Submit the transfer for `quote`.
    ///
    /// Once the wallet accepts the call the transfer counts as submitted,
    /// even if the returned identifier is not a well-formed hash.
    ///
    /// # Errors
    /// - `InvalidAmount` before any wallet call if the amount is unusable
    /// - `SubmissionFailed` for any wallet-side refusal (user rejection,
    ///   insufficient balance, gas estimation)
    pub async fn submit_transfer(
        &self,
        session: &WalletSession,
        quote: &Quote,
    ) -> PaymentResult<SubmittedTransfer> {
        let request = self.prepare(session, quote)?;
        info!(
            from = %request.from,
            to = %request.recipient,
            amount = %request.amount,
            symbol = %self.symbol,
            "Submitting token transfer"
        );

        let result = session
            .provider()
            .request("eth_sendTransaction", json!([request.to_transaction()]))
            .await
            .map_err(|e| {
                warn!(error = %e, "Transfer rejected by wallet");
                PaymentError::SubmissionFailed(e.to_string())
            })?;

        let tx = TransactionHandle::from_result(&result);
        if tx.hash().is_none() {
            warn!(%result, "Wallet accepted the transfer but returned a non-hash identifier");
        }

        info!(tx = %tx, "Transfer submitted");
        Ok(SubmittedTransfer { tx, request })
    }
}
