//! Wallet connection.
//!
//! `connect()` runs two wallet requests in order:
//! 1. `wallet_addEthereumChain` with the configured chain. A failure here is
//!    reported in [`ConnectReport::network_switch_error`] but does not stop
//!    the connection.
//! 2. `eth_requestAccounts`; the first returned account becomes the session
//!    account. Code 4001 maps to `UserRejected`.
//!
//! When the switch failed, the session's chain is whatever the wallet reports
//! through `eth_chainId` and may differ from the target chain.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::utils::format_ether;
use alloy::primitives::{Address, U256};
use serde_json::{json, Value};
use stockpay_core::{PaymentError, PaymentResult};
use tracing::{debug, info, warn};

use crate::chain::ChainConfig;
use crate::provider::DynWalletProvider;

/// A connected wallet account.
///
/// Holds the provider it was obtained from, so components that act on the
/// session (the transfer executor) reach the same wallet.
#[derive(Clone)]
pub struct WalletSession {
    account: Address,
    chain_id: Option<u64>,
    target_chain_id: u64,
    provider: DynWalletProvider,
}

impl WalletSession {
    pub fn account(&self) -> Address {
        self.account
    }

    /// Chain the wallet is on, if known.
    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    #[must_use]
    pub fn is_on_target_chain(&self) -> bool {
        self.chain_id == Some(self.target_chain_id)
    }

    pub fn provider(&self) -> &DynWalletProvider {
        &self.provider
    }
}

impl fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSession")
            .field("account", &self.account)
            .field("chain_id", &self.chain_id)
            .field("target_chain_id", &self.target_chain_id)
            .finish_non_exhaustive()
    }
}

/// Outcome of a successful `connect()`.
#[derive(Debug, Clone)]
pub struct ConnectReport {
    pub session: WalletSession,
    /// `NetworkSwitchFailed` when the add/switch request errored.
    pub network_switch_error: Option<PaymentError>,
}

/// Native-currency balance of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeBalance {
    pub wei: U256,
}

impl NativeBalance {
    /// Balance in whole ether units, as a decimal string.
    pub fn as_ether(&self) -> String {
        format_ether(self.wei)
    }
}

/// Connects to the user's wallet on the target chain.
pub struct WalletConnector {
    provider: Option<DynWalletProvider>,
    chain: ChainConfig,
}

impl WalletConnector {
    /// `provider` is `None` when no wallet is present.
    pub fn new(provider: Option<DynWalletProvider>, chain: ChainConfig) -> Self {
        Self { provider, chain }
    }

    fn provider(&self) -> PaymentResult<&DynWalletProvider> {
        self.provider.as_ref().ok_or_else(|| {
            PaymentError::WalletUnavailable(
                "no wallet found; install or configure a compatible wallet".to_string(),
            )
        })
    }

    /// Switch to the target chain and request account access.
    ///
    /// # Errors
    /// - `WalletUnavailable` if no provider is present, the account request
    ///   fails for a reason other than user rejection, or no account is returned
    /// - `UserRejected` if the user denies account access
    pub async fn connect(&self) -> PaymentResult<ConnectReport> {
        let provider = self.provider()?.clone();

        let network_switch_error = match self.switch_network(&provider).await {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "Network switch failed, continuing with account request");
                Some(e)
            }
        };

        info!("Requesting wallet accounts");
        let accounts = provider
            .request("eth_requestAccounts", json!([]))
            .await
            .map_err(|e| {
                if e.is_user_rejected() {
                    PaymentError::UserRejected(
                        "user rejected the wallet connection request".to_string(),
                    )
                } else {
                    PaymentError::WalletUnavailable(format!("wallet connection failed: {e}"))
                }
            })?;
        let account = first_account(&accounts)?;

        let chain_id = if network_switch_error.is_none() {
            Some(self.chain.chain_id)
        } else {
            current_chain_id(&provider).await
        };

        info!(%account, ?chain_id, "Wallet connected");
        Ok(ConnectReport {
            session: WalletSession {
                account,
                chain_id,
                target_chain_id: self.chain.chain_id,
                provider,
            },
            network_switch_error,
        })
    }

    async fn switch_network(&self, provider: &DynWalletProvider) -> PaymentResult<()> {
        let descriptor = serde_json::to_value(self.chain.to_wire())
            .map_err(|e| PaymentError::NetworkSwitchFailed(e.to_string()))?;
        info!(
            chain_id = %self.chain.chain_id_hex(),
            chain_name = %self.chain.chain_name,
            "Requesting network add/switch"
        );

        provider
            .request("wallet_addEthereumChain", json!([descriptor]))
            .await
            .map(|_| ())
            .map_err(|e| PaymentError::NetworkSwitchFailed(e.to_string()))
    }

    /// Native-currency balance of `account` at the latest block.
    ///
    /// # Errors
    /// `WalletUnavailable` without a provider, `DataUnavailable` if the query
    /// fails or returns a malformed quantity.
    pub async fn native_balance(&self, account: Address) -> PaymentResult<NativeBalance> {
        let provider = self.provider()?;
        let value = provider
            .request("eth_getBalance", json!([account.to_string(), "latest"]))
            .await
            .map_err(|e| PaymentError::DataUnavailable(format!("balance query failed: {e}")))?;

        let wei = parse_quantity(&value)
            .map_err(|e| PaymentError::DataUnavailable(format!("balance query failed: {e}")))?;
        debug!(%account, %wei, "Native balance");
        Ok(NativeBalance { wei })
    }

    /// Current gas price in wei.
    ///
    /// # Errors
    /// Same as [`native_balance`](Self::native_balance).
    pub async fn gas_price(&self) -> PaymentResult<U256> {
        let provider = self.provider()?;
        let value = provider
            .request("eth_gasPrice", json!([]))
            .await
            .map_err(|e| PaymentError::DataUnavailable(format!("gas price query failed: {e}")))?;

        parse_quantity(&value)
            .map_err(|e| PaymentError::DataUnavailable(format!("gas price query failed: {e}")))
    }
}

fn first_account(accounts: &Value) -> PaymentResult<Address> {
    let first = accounts
        .as_array()
        .and_then(|list| list.first())
        .and_then(Value::as_str)
        .ok_or_else(|| {
            PaymentError::WalletUnavailable("wallet returned no accounts".to_string())
        })?;

    Address::from_str(first).map_err(|e| {
        PaymentError::WalletUnavailable(format!("wallet returned malformed account {first:?}: {e}"))
    })
}

async fn current_chain_id(provider: &DynWalletProvider) -> Option<u64> {
    let value = match provider.request("eth_chainId", json!([])).await {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Could not read current chain id");
            return None;
        }
    };
    let parsed = value
        .as_str()
        .and_then(|s| u64::from_str_radix(s.trim_start_matches("0x"), 16).ok());
    if parsed.is_none() {
        warn!(%value, "Malformed chain id from wallet");
    }
    parsed
}

/// Parse a hex-encoded JSON-RPC quantity ("0x1bc16d674ec80000").
fn parse_quantity(value: &Value) -> Result<U256, String> {
    let s = value
        .as_str()
        .ok_or_else(|| format!("expected hex quantity, got {value}"))?;
    if !s.starts_with("0x") {
        return Err(format!("expected 0x-prefixed quantity, got {s:?}"));
    }
    U256::from_str(s).map_err(|e| format!("malformed quantity {s:?}: {e}"))
}
