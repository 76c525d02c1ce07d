use std::path::Path;

use alloy::primitives::{address, Address};
use serde::Deserialize;

use dripdash_core::{PortError, TokenInfo, TokenRegistryPort};

/// Token-list JSON document (`{"name": ..., "tokens": [...]}`).
#[derive(Debug, Deserialize)]
struct TokenListFile {
    tokens: Vec<TokenInfo>,
}

const MAINNET: &[(Address, &str, &str, u8)] = &[
    (address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"), "USD Coin", "USDC", 6),
    (address!("6B175474E89094C44Da98b954EedeAC495271d0F"), "Dai Stablecoin", "DAI", 18),
    (address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"), "Wrapped Ether", "WETH", 18),
    (address!("dAC17F958D2ee523a2206206994597C13D831ec7"), "Tether USD", "USDT", 6),
];

#[derive(Debug, Clone)]
pub struct TokenListAdapter {
    chain_id: u64,
    tokens: Vec<TokenInfo>,
}

impl Default for TokenListAdapter {
    fn default() -> Self {
        Self::builtin(1)
    }
}

impl TokenListAdapter {
    /// Built-in list. Only Ethereum mainnet has entries.
    pub fn builtin(chain_id: u64) -> Self {
        let tokens = if chain_id == 1 {
            MAINNET
                .iter()
                .map(|(address, name, symbol, decimals)| TokenInfo {
                    chain_id,
                    address: *address,
                    name: (*name).to_owned(),
                    symbol: (*symbol).to_owned(),
                    decimals: *decimals,
                    logo_uri: None,
                })
                .collect()
        } else {
            Vec::new()
        };
        Self { chain_id, tokens }
    }

    /// Parse a token list, keeping the entries for `chain_id`.
    pub fn from_json(json: &str, chain_id: u64) -> Result<Self, PortError> {
        let file: TokenListFile = serde_json::from_str(json)
            .map_err(|e| PortError::Validation(format!("invalid token list: {e}")))?;
        let mut list = Self {
            chain_id,
            tokens: Vec::new(),
        };
        for token in file.tokens.into_iter().filter(|t| t.chain_id == chain_id) {
            list = list.with_token(token);
        }
        Ok(list)
    }

    pub fn from_path(path: &Path, chain_id: u64) -> Result<Self, PortError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            PortError::Transport(format!("failed to read token list {}: {e}", path.display()))
        })?;
        let list = Self::from_json(&json, chain_id)?;
        tracing::info!(path = %path.display(), tokens = list.tokens.len(), "loaded token list");
        Ok(list)
    }

    /// Add a token, replacing any entry with the same address.
    pub fn with_token(mut self, token: TokenInfo) -> Self {
        self.tokens.retain(|t| t.address != token.address);
        self.tokens.push(token);
        self
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

impl TokenRegistryPort for TokenListAdapter {
    fn get_by_address(&self, address: Address) -> Option<TokenInfo> {
        self.tokens.iter().find(|t| t.address == address).cloned()
    }

    fn tokens(&self) -> Vec<TokenInfo> {
        self.tokens.clone()
    }
}
