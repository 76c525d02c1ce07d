//! ERC-20 and top-up backend
//!
//! Either talks to a JSON-RPC node that holds the configured account, or keeps
//! an in-memory ledger so the wizard can run without a node.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{keccak256, Address, Bytes, B256, U256};
use alloy::sol_types::SolCall;
use parking_lot::Mutex;
use serde_json::{json, Value};

use dripdash_core::{Erc20Port, PortError, TokenRegistryPort, TopUpPort};

use crate::contracts::{IAddressDriver, IERC20};
use crate::rpc::{parse_quantity, parse_tx_hash, JsonRpcClient};
use crate::AdapterConfig;

#[derive(Debug, Clone)]
pub struct ChainAdapter {
    mode: ChainMode,
    account: Address,
    driver: Address,
    receipt_poll: Duration,
    receipt_timeout: Duration,
    ledger: Arc<Mutex<Ledger>>,
}

#[derive(Debug, Clone)]
enum ChainMode {
    Disabled(String),
    Deterministic,
    Rpc(JsonRpcClient),
}

#[derive(Debug, Default)]
struct Ledger {
    /// (token, owner) → balance
    balances: HashMap<(Address, Address), U256>,
    /// (token, owner, spender) → allowance
    allowances: HashMap<(Address, Address, Address), U256>,
    /// (token, owner) → streaming balance
    deposits: HashMap<(Address, Address), U256>,
    tx_seq: u64,
}

impl Ledger {
    fn next_tx_hash(&mut self, tag: &str, token: Address, amount: U256) -> B256 {
        self.tx_seq = self.tx_seq.saturating_add(1);
        let mut seed = Vec::new();
        seed.extend_from_slice(tag.as_bytes());
        seed.extend_from_slice(&self.tx_seq.to_be_bytes());
        seed.extend_from_slice(token.as_slice());
        seed.extend_from_slice(&amount.to_be_bytes::<32>());
        keccak256(seed)
    }
}

impl Default for ChainAdapter {
    fn default() -> Self {
        Self::with_config(&AdapterConfig::default())
    }
}

impl ChainAdapter {
    pub fn with_config(config: &AdapterConfig) -> Self {
        let mode = match config.rpc_url {
            Some(ref url) => match JsonRpcClient::new(url.clone(), config.rpc_timeout_ms) {
                Ok(client) => ChainMode::Rpc(client),
                Err(e) => {
                    tracing::warn!(error = %e, "rpc backend unavailable");
                    ChainMode::Disabled(e.to_string())
                }
            },
            None => ChainMode::Deterministic,
        };
        Self {
            mode,
            account: config.account,
            driver: config.driver_address,
            receipt_poll: Duration::from_millis(config.receipt_poll_ms),
            receipt_timeout: Duration::from_millis(config.receipt_timeout_ms),
            ledger: Arc::new(Mutex::new(Ledger::default())),
        }
    }

    /// Deterministic backend with `demo_balance` whole tokens of every listed token.
    pub fn seeded(config: &AdapterConfig, tokens: &dyn TokenRegistryPort) -> Self {
        let adapter = Self::with_config(config);
        if adapter.is_deterministic() && config.demo_balance > 0 {
            let mut ledger = adapter.ledger.lock();
            for token in tokens.tokens() {
                let amount = U256::from(config.demo_balance)
                    .saturating_mul(U256::from(10u8).pow(U256::from(token.decimals)));
                ledger.balances.insert((token.address, config.account), amount);
            }
        }
        adapter
    }

    pub fn account(&self) -> Address {
        self.account
    }

    pub fn driver(&self) -> Address {
        self.driver
    }

    pub fn is_deterministic(&self) -> bool {
        matches!(self.mode, ChainMode::Deterministic)
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.mode, ChainMode::Disabled(_))
    }

    /// Short label for the active backend.
    pub fn describe(&self) -> String {
        match &self.mode {
            ChainMode::Disabled(reason) => format!("disabled ({reason})"),
            ChainMode::Deterministic => "in-memory demo ledger".to_owned(),
            ChainMode::Rpc(client) => format!("rpc {}", client.url()),
        }
    }

    pub fn seed_balance(&self, token: Address, owner: Address, amount: U256) -> Result<(), PortError> {
        if !self.is_deterministic() {
            return Err(PortError::Policy(
                "balances can only be seeded on the in-memory ledger".to_owned(),
            ));
        }
        self.ledger.lock().balances.insert((token, owner), amount);
        Ok(())
    }

    /// Streaming balance credited by top-ups on the in-memory ledger.
    pub fn deposited(&self, token: Address, owner: Address) -> U256 {
        self.ledger
            .lock()
            .deposits
            .get(&(token, owner))
            .copied()
            .unwrap_or_default()
    }

    fn rpc(&self) -> Result<Option<&JsonRpcClient>, PortError> {
        match &self.mode {
            ChainMode::Disabled(reason) => Err(PortError::Policy(reason.clone())),
            ChainMode::Deterministic => Ok(None),
            ChainMode::Rpc(client) => Ok(Some(client)),
        }
    }

    fn eth_call(client: &JsonRpcClient, to: Address, data: Vec<u8>) -> Result<U256, PortError> {
        let result = client.call(
            "eth_call",
            json!([{ "to": to, "data": Bytes::from(data) }, "latest"]),
        )?;
        parse_quantity(&result)
    }

    fn send_transaction(
        &self,
        client: &JsonRpcClient,
        to: Address,
        data: Vec<u8>,
    ) -> Result<B256, PortError> {
        let tx: Value = json!({
            "from": self.account,
            "to": to,
            "data": Bytes::from(data),
        });
        let result = client.call("eth_sendTransaction", json!([tx]))?;
        let tx_hash = parse_tx_hash(&result)?;
        client.wait_for_receipt(tx_hash, self.receipt_poll, self.receipt_timeout)?;
        tracing::info!(%tx_hash, %to, "transaction mined");
        Ok(tx_hash)
    }
}

impl Erc20Port for ChainAdapter {
    fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, PortError> {
        match self.rpc()? {
            Some(client) => {
                let data = IERC20::allowanceCall { owner, spender }.abi_encode();
                Self::eth_call(client, token, data)
            }
            None => Ok(self
                .ledger
                .lock()
                .allowances
                .get(&(token, owner, spender))
                .copied()
                .unwrap_or_default()),
        }
    }

    fn balance_of(&self, token: Address, owner: Address) -> Result<U256, PortError> {
        match self.rpc()? {
            Some(client) => {
                let data = IERC20::balanceOfCall { account: owner }.abi_encode();
                Self::eth_call(client, token, data)
            }
            None => Ok(self
                .ledger
                .lock()
                .balances
                .get(&(token, owner))
                .copied()
                .unwrap_or_default()),
        }
    }

    fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<B256, PortError> {
        match self.rpc()? {
            Some(client) => {
                let data = IERC20::approveCall { spender, amount }.abi_encode();
                self.send_transaction(client, token, data)
            }
            None => {
                let mut ledger = self.ledger.lock();
                ledger
                    .allowances
                    .insert((token, self.account, spender), amount);
                Ok(ledger.next_tx_hash("approve", token, amount))
            }
        }
    }
}

impl TopUpPort for ChainAdapter {
    fn top_up(&self, token: Address, amount: U256) -> Result<B256, PortError> {
        if amount > U256::from(i128::MAX as u128) {
            return Err(PortError::Validation(
                "top-up amount exceeds int128 balance delta".to_owned(),
            ));
        }
        match self.rpc()? {
            Some(client) => {
                let data = IAddressDriver::setStreamsCall {
                    erc20: token,
                    currReceivers: Vec::new(),
                    balanceDelta: amount.saturating_to::<u128>() as i128,
                    newReceivers: Vec::new(),
                    maxEndHint1: 0,
                    maxEndHint2: 0,
                    transferTo: self.account,
                }
                .abi_encode();
                self.send_transaction(client, self.driver, data)
            }
            None => {
                let mut ledger = self.ledger.lock();
                let owner = self.account;
                let balance = ledger
                    .balances
                    .get(&(token, owner))
                    .copied()
                    .unwrap_or_default();
                let allowance = ledger
                    .allowances
                    .get(&(token, owner, self.driver))
                    .copied()
                    .unwrap_or_default();
                if balance < amount {
                    return Err(PortError::Validation("insufficient token balance".to_owned()));
                }
                if allowance < amount {
                    return Err(PortError::Validation("insufficient allowance".to_owned()));
                }

                ledger.balances.insert((token, owner), balance - amount);
                ledger
                    .allowances
                    .insert((token, owner, self.driver), allowance - amount);
                *ledger.deposits.entry((token, owner)).or_default() += amount;
                Ok(ledger.next_tx_hash("top-up", token, amount))
            }
        }
    }
}
