//! Wallet access and token transfers for stockpay.
//!
//! The wallet is reached through a single request/response seam,
//! [`WalletProvider`], mirroring the EIP-1193 `request({method, params})`
//! interface of browser wallets.
//!
//! # Key Components
//!
//! - [`WalletConnector`]: adds/switches the target network and requests
//!   account access, producing a [`WalletSession`]
//! - [`TransferExecutor`]: submits an ERC-20 `transfer` for a quote from the
//!   session's account
//! - [`HttpWalletProvider`]: JSON-RPC over HTTP provider
//! - [`MockWalletProvider`]: scripted provider for tests

pub mod chain;
pub mod error;
pub mod http_provider;
pub mod mock;
pub mod provider;
pub mod session;
pub mod transfer;

pub use chain::{AddEthereumChainParameter, ChainConfig, NativeCurrency};
pub use error::{ProviderError, WalletConfigError, USER_REJECTED_CODE};
pub use http_provider::HttpWalletProvider;
pub use mock::{MockWalletProvider, RecordedRequest};
pub use provider::{BoxFuture, DynWalletProvider, WalletProvider};
pub use session::{ConnectReport, NativeBalance, WalletConnector, WalletSession};
pub use transfer::{
    SubmittedTransfer, TokenConfig, TransactionHandle, TransferExecutor, TransferRequest,
};
