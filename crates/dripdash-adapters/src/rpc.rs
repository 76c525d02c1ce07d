use std::time::{Duration, Instant};

use alloy::primitives::{B256, U256};
use serde_json::{json, Value};

use dripdash_core::PortError;

/// Minimal blocking JSON-RPC 2.0 client.
#[derive(Debug, Clone)]
pub struct JsonRpcClient {
    url: String,
    client: reqwest::blocking::Client,
}

impl JsonRpcClient {
    pub fn new(url: impl Into<String>, timeout_ms: u64) -> Result<Self, PortError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| PortError::Transport(format!("failed to build rpc client: {e}")))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn call(&self, method: &str, params: Value) -> Result<Value, PortError> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .map_err(|e| PortError::Transport(format!("rpc request {method} failed: {e}")))?;
        let status = response.status();
        let body: Value = response
            .json()
            .map_err(|e| PortError::Transport(format!("rpc json decode failed: {e}")))?;
        if !status.is_success() {
            return Err(PortError::Transport(format!("rpc status {}: {}", status, body)));
        }
        if let Some(err) = body.get("error") {
            return Err(PortError::Transport(format!("rpc returned error: {err}")));
        }
        body.get("result")
            .cloned()
            .ok_or_else(|| PortError::Transport("rpc response missing result".to_owned()))
    }

    /// Poll `eth_getTransactionReceipt` until `tx_hash` is mined.
    ///
    /// A receipt with status 0 is an error, as is running past `timeout`.
    pub fn wait_for_receipt(
        &self,
        tx_hash: B256,
        poll: Duration,
        timeout: Duration,
    ) -> Result<(), PortError> {
        let started = Instant::now();
        loop {
            let receipt = self.call("eth_getTransactionReceipt", json!([tx_hash]))?;
            if !receipt.is_null() {
                let status = receipt.get("status").map(parse_quantity).transpose()?;
                return match status {
                    Some(status) if status.is_zero() => Err(PortError::Transport(format!(
                        "transaction {tx_hash} reverted"
                    ))),
                    _ => Ok(()),
                };
            }
            if started.elapsed() >= timeout {
                return Err(PortError::Transport(format!(
                    "transaction {tx_hash} not mined within {}ms",
                    timeout.as_millis()
                )));
            }
            std::thread::sleep(poll);
        }
    }
}

/// Decode a hex quantity or a 32-byte `eth_call` word.
pub fn parse_quantity(value: &Value) -> Result<U256, PortError> {
    let raw = value
        .as_str()
        .ok_or_else(|| PortError::Transport(format!("expected hex string, got {value}")))?;
    let hex = raw.strip_prefix("0x").unwrap_or(raw);
    if hex.is_empty() {
        return Err(PortError::Transport(
            "empty call result (is the token a contract?)".to_owned(),
        ));
    }
    U256::from_str_radix(hex, 16)
        .map_err(|e| PortError::Transport(format!("invalid quantity {raw}: {e}")))
}

pub fn parse_tx_hash(value: &Value) -> Result<B256, PortError> {
    value
        .as_str()
        .ok_or_else(|| PortError::Transport(format!("expected tx hash, got {value}")))?
        .parse()
        .map_err(|e| PortError::Transport(format!("invalid tx hash: {e}")))
}
