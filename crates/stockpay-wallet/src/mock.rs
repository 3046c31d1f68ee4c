//! Scripted wallet provider for tests.

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::ProviderError;
use crate::provider::{BoxFuture, WalletProvider};

/// A request seen by [`MockWalletProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub params: Value,
}

type Reply = Result<Value, ProviderError>;

/// Mock wallet provider.
///
/// Replies are looked up per method: one-shot replies queued with
/// [`respond_once`](Self::respond_once) are used first, then the standing
/// reply set with [`respond`](Self::respond). Methods with neither answer
/// JSON-RPC "method not found".
#[derive(Debug, Default)]
pub struct MockWalletProvider {
    requests: Mutex<Vec<RecordedRequest>>,
    standing: Mutex<HashMap<String, Reply>>,
    queued: Mutex<HashMap<String, VecDeque<Reply>>>,
}

impl MockWalletProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that accepts the network switch, hands out `account`,
    /// reports chain `chain_id_hex` and returns `tx_hash` for transfers.
    pub fn cooperative(account: &str, chain_id_hex: &str, tx_hash: &str) -> Self {
        let mock = Self::new();
        mock.respond("wallet_addEthereumChain", Ok(Value::Null));
        mock.respond("eth_requestAccounts", Ok(serde_json::json!([account])));
        mock.respond("eth_chainId", Ok(Value::String(chain_id_hex.to_string())));
        mock.respond("eth_sendTransaction", Ok(Value::String(tx_hash.to_string())));
        mock
    }

    /// Set the standing reply for `method`.
    pub fn respond(&self, method: &str, reply: Reply) {
        self.standing.lock().insert(method.to_string(), reply);
    }

    /// Queue a reply used once, ahead of the standing reply.
    pub fn respond_once(&self, method: &str, reply: Reply) {
        self.queued
            .lock()
            .entry(method.to_string())
            .or_default()
            .push_back(reply);
    }

    /// All recorded requests, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Number of recorded requests for `method`.
    pub fn count(&self, method: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }

    fn reply_for(&self, method: &str) -> Reply {
        if let Some(reply) = self
            .queued
            .lock()
            .get_mut(method)
            .and_then(VecDeque::pop_front)
        {
            return reply;
        }
        self.standing
            .lock()
            .get(method)
            .cloned()
            .unwrap_or_else(|| Err(ProviderError::new(-32601, format!("method {method} not found"))))
    }
}

impl WalletProvider for MockWalletProvider {
    fn request<'a>(
        &'a self,
        method: &'a str,
        params: Value,
    ) -> BoxFuture<'a, Result<Value, ProviderError>> {
        Box::pin(async move {
            self.requests.lock().push(RecordedRequest {
                method: method.to_string(),
                params,
            });
            self.reply_for(method)
        })
    }
}
