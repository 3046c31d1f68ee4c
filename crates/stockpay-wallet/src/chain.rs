//! Target network description.
//!
//! `ChainConfig` is the configuration form (numeric chain id);
//! `AddEthereumChainParameter` is the EIP-3085 wire form sent with
//! `wallet_addEthereumChain` (hex chain id, camelCase keys).

use serde::{Deserialize, Serialize};

/// Native currency metadata of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for NativeCurrency {
    fn default() -> Self {
        Self {
            name: "ETH".to_string(),
            symbol: "ETH".to_string(),
            decimals: 18,
        }
    }
}

/// Network the wallet is asked to add/switch to before connecting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Default: 42161 (Arbitrum One).
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    #[serde(default = "default_chain_name")]
    pub chain_name: String,
    #[serde(default = "default_rpc_urls")]
    pub rpc_urls: Vec<String>,
    #[serde(default = "default_block_explorer_urls")]
    pub block_explorer_urls: Vec<String>,
    #[serde(default)]
    pub native_currency: NativeCurrency,
}

fn default_chain_id() -> u64 {
    42161
}

fn default_chain_name() -> String {
    "Arbitrum One".to_string()
}

fn default_rpc_urls() -> Vec<String> {
    vec!["https://arb1.arbitrum.io/rpc".to_string()]
}

fn default_block_explorer_urls() -> Vec<String> {
    vec!["https://arbiscan.io".to_string()]
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            chain_name: default_chain_name(),
            rpc_urls: default_rpc_urls(),
            block_explorer_urls: default_block_explorer_urls(),
            native_currency: NativeCurrency::default(),
        }
    }
}

impl ChainConfig {
    /// Chain id as a 0x-prefixed hex quantity.
    pub fn chain_id_hex(&self) -> String {
        format!("{:#x}", self.chain_id)
    }

    /// Build the `wallet_addEthereumChain` parameter.
    pub fn to_wire(&self) -> AddEthereumChainParameter {
        AddEthereumChainParameter {
            chain_id: self.chain_id_hex(),
            chain_name: self.chain_name.clone(),
            rpc_urls: self.rpc_urls.clone(),
            block_explorer_urls: self.block_explorer_urls.clone(),
            native_currency: self.native_currency.clone(),
        }
    }
}

/// EIP-3085 `wallet_addEthereumChain` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEthereumChainParameter {
    pub chain_id: String,
    pub chain_name: String,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
    pub native_currency: NativeCurrency,
}
