//! Wallet provider trait.
//!
//! One asynchronous request/response call per wallet operation, with no
//! implicit queuing. This allows for:
//! - Dependency injection for testing
//! - Swapping the transport (HTTP JSON-RPC, in-process mock)

use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ProviderError;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Interface to the user's wallet.
pub trait WalletProvider: Send + Sync {
    /// Issue `method` with positional `params` (a JSON array).
    fn request<'a>(&'a self, method: &'a str, params: Value)
        -> BoxFuture<'a, Result<Value, ProviderError>>;
}

/// Arc wrapper for WalletProvider trait objects.
pub type DynWalletProvider = Arc<dyn WalletProvider>;
