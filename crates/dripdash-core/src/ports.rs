use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("policy error: {0}")]
    Policy(String),
}

/// Token metadata as published in a token list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub chain_id: u64,
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(default, rename = "logoURI", skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
}

pub trait TokenRegistryPort {
    fn get_by_address(&self, address: Address) -> Option<TokenInfo>;
    fn tokens(&self) -> Vec<TokenInfo>;
}

pub trait Erc20Port {
    fn allowance(&self, token: Address, owner: Address, spender: Address)
        -> Result<U256, PortError>;
    fn balance_of(&self, token: Address, owner: Address) -> Result<U256, PortError>;
    fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<B256, PortError>;
}

pub trait TopUpPort {
    /// Move `amount` of `token` from the connected account into its streaming balance.
    fn top_up(&self, token: Address, amount: U256) -> Result<B256, PortError>;
}
