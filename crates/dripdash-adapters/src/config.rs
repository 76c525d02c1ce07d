use std::path::PathBuf;
use std::str::FromStr;

use alloy::primitives::{address, Address};

/// Account used when no wallet is configured.
pub const DEFAULT_ACCOUNT: Address = address!("1000000000000000000000000000000000000001");
pub const DEFAULT_DRIVER_ADDRESS: Address = address!("1455d9bD6B98f95dd8FEB2b3D60ed825fcef0610");

#[derive(Debug, Clone)]
pub struct AdapterConfig {
    pub chain_id: u64,
    /// JSON-RPC node. `None` selects the in-memory deterministic backend.
    pub rpc_url: Option<String>,
    pub rpc_timeout_ms: u64,
    /// How long to wait for a sent transaction to be mined.
    pub receipt_timeout_ms: u64,
    pub receipt_poll_ms: u64,
    /// Account the node signs for (`eth_sendTransaction` sender).
    pub account: Address,
    /// Contract that receives the allowance and the top-up.
    pub driver_address: Address,
    pub token_list_path: Option<PathBuf>,
    /// Whole tokens credited to `account` per listed token in deterministic mode.
    pub demo_balance: u64,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            chain_id: 1,
            rpc_url: None,
            rpc_timeout_ms: 15_000,
            receipt_timeout_ms: 120_000,
            receipt_poll_ms: 1_000,
            account: DEFAULT_ACCOUNT,
            driver_address: DEFAULT_DRIVER_ADDRESS,
            token_list_path: None,
            demo_balance: 1_000,
        }
    }
}

impl AdapterConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            chain_id: env_parse("DRIPDASH_CHAIN_ID", defaults.chain_id),
            rpc_url: env_string("DRIPDASH_RPC_URL"),
            rpc_timeout_ms: env_parse("DRIPDASH_RPC_TIMEOUT_MS", defaults.rpc_timeout_ms),
            receipt_timeout_ms: env_parse(
                "DRIPDASH_RECEIPT_TIMEOUT_MS",
                defaults.receipt_timeout_ms,
            ),
            receipt_poll_ms: env_parse("DRIPDASH_RECEIPT_POLL_MS", defaults.receipt_poll_ms),
            account: env_parse("DRIPDASH_ACCOUNT", defaults.account),
            driver_address: env_parse("DRIPDASH_DRIVER_ADDRESS", defaults.driver_address),
            token_list_path: env_string("DRIPDASH_TOKEN_LIST").map(PathBuf::from),
            demo_balance: env_parse("DRIPDASH_DEMO_BALANCE", defaults.demo_balance),
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match env_string(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring invalid config value");
            default
        }),
        None => default,
    }
}
