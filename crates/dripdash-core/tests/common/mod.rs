#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy::primitives::{keccak256, Address, B256, U256};

use dripdash_core::{
    Erc20Port, PortError, SharedTokenRegistry, TokenInfo, TokenRegistryPort, TopUpPort,
};

#[derive(Debug, Default)]
pub struct StaticTokens(pub Vec<TokenInfo>);

impl TokenRegistryPort for StaticTokens {
    fn get_by_address(&self, address: Address) -> Option<TokenInfo> {
        self.0.iter().find(|t| t.address == address).cloned()
    }

    fn tokens(&self) -> Vec<TokenInfo> {
        self.0.clone()
    }
}

pub fn token_address() -> Address {
    "0x00000000000000000000000000000000000000A1"
        .parse()
        .expect("valid token address")
}

pub fn owner_address() -> Address {
    "0x1000000000000000000000000000000000000001"
        .parse()
        .expect("valid owner address")
}

pub fn driver_address() -> Address {
    "0x000000000000000000000000000000000000D1D1"
        .parse()
        .expect("valid driver address")
}

pub fn tok() -> TokenInfo {
    TokenInfo {
        chain_id: 1,
        address: token_address(),
        name: "TOK".to_owned(),
        symbol: "TOK".to_owned(),
        decimals: 18,
        logo_uri: None,
    }
}

pub fn registry() -> SharedTokenRegistry {
    Arc::new(StaticTokens(vec![tok()]))
}

pub fn ether(whole: u64) -> U256 {
    U256::from(whole) * U256::from(10u8).pow(U256::from(18u8))
}

/// In-memory ERC-20 + top-up backend for a single owner.
#[derive(Debug, Default)]
pub struct FakeChain {
    pub balances: Mutex<HashMap<Address, U256>>,
    pub allowances: Mutex<HashMap<Address, U256>>,
    pub topped_up: Mutex<Vec<(Address, U256)>>,
    pub approvals: Mutex<u64>,
}

impl FakeChain {
    pub fn with_balance(token: Address, balance: U256) -> Self {
        let chain = Self::default();
        chain.balances.lock().expect("balances").insert(token, balance);
        chain
    }

    pub fn with_allowance(self, token: Address, allowance: U256) -> Self {
        self.allowances
            .lock()
            .expect("allowances")
            .insert(token, allowance);
        self
    }

    fn tx_hash(tag: &str, n: u64) -> B256 {
        keccak256(format!("{tag}:{n}"))
    }
}

impl Erc20Port for FakeChain {
    fn allowance(
        &self,
        token: Address,
        _owner: Address,
        _spender: Address,
    ) -> Result<U256, PortError> {
        Ok(self
            .allowances
            .lock()
            .expect("allowances")
            .get(&token)
            .copied()
            .unwrap_or_default())
    }

    fn balance_of(&self, token: Address, _owner: Address) -> Result<U256, PortError> {
        Ok(self
            .balances
            .lock()
            .expect("balances")
            .get(&token)
            .copied()
            .unwrap_or_default())
    }

    fn approve(&self, token: Address, _spender: Address, amount: U256) -> Result<B256, PortError> {
        self.allowances
            .lock()
            .expect("allowances")
            .insert(token, amount);
        let mut n = self.approvals.lock().expect("approvals");
        *n += 1;
        Ok(Self::tx_hash("approve", *n))
    }
}

impl TopUpPort for FakeChain {
    fn top_up(&self, token: Address, amount: U256) -> Result<B256, PortError> {
        let mut topped_up = self.topped_up.lock().expect("topped up");
        topped_up.push((token, amount));
        Ok(Self::tx_hash("top-up", topped_up.len() as u64))
    }
}
