//! JSON-RPC over HTTP wallet provider.
//!
//! Forwards each request to a JSON-RPC 2.0 endpoint that fronts the user's
//! wallet (a wallet bridge or a node holding the account). JSON-RPC error
//! objects keep their numeric code so user rejections (4001) stay
//! distinguishable.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{ProviderError, WalletConfigError};
use crate::provider::{BoxFuture, WalletProvider};

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Wallet provider speaking JSON-RPC 2.0 over HTTP.
pub struct HttpWalletProvider {
    client: Client,
    url: String,
    next_id: AtomicU64,
}

impl HttpWalletProvider {
    /// Create a provider for the endpoint at `url`.
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, WalletConfigError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            WalletConfigError::HttpClient(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        debug!(id, method, url = %self.url, "Wallet JSON-RPC request");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::transport(format!("wallet request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::transport(format!("HTTP {status}: {body}")));
        }

        let body: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::transport(format!("malformed wallet response: {e}")))?;

        into_result(body)
    }
}

fn into_result(body: JsonRpcResponse) -> Result<Value, ProviderError> {
    match (body.result, body.error) {
        (_, Some(err)) => Err(ProviderError::new(err.code, err.message)),
        (Some(result), None) => Ok(result),
        // `"result": null` deserializes to None; null is a valid result.
        (None, None) => Ok(Value::Null),
    }
}

impl WalletProvider for HttpWalletProvider {
    fn request<'a>(
        &'a self,
        method: &'a str,
        params: Value,
    ) -> BoxFuture<'a, Result<Value, ProviderError>> {
        Box::pin(self.call(method, params))
    }
}
