#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use alloy::primitives::{address, Address};
use serde_json::{json, Value};
use tiny_http::{Response, Server, StatusCode};

pub const DAI: Address = address!("6B175474E89094C44Da98b954EedeAC495271d0F");
pub const USDC: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

pub const TX_HASH: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

/// Selector → 32-byte word answered for `eth_call`.
pub type CallAnswers = Vec<(&'static str, String)>;

pub fn word(value: u128) -> String {
    format!("0x{:064x}", value)
}

/// How the mock node answers `eth_getTransactionReceipt`.
#[derive(Debug, Clone, Copy)]
pub struct Receipts {
    /// Polls answered with `null` before the receipt appears.
    pub pending_polls: usize,
    /// Receipt status; `None` never mines.
    pub status: Option<&'static str>,
}

impl Default for Receipts {
    fn default() -> Self {
        Self {
            pending_polls: 0,
            status: Some("0x1"),
        }
    }
}

/// Mock JSON-RPC node that mines every transaction right away.
pub fn spawn_mock_node(
    answers: CallAnswers,
    requests: Arc<Mutex<Vec<Value>>>,
) -> (String, thread::JoinHandle<()>) {
    spawn_mock_node_with(answers, Receipts::default(), requests)
}

/// Mock JSON-RPC node. Records every request body it receives.
pub fn spawn_mock_node_with(
    answers: CallAnswers,
    receipts: Receipts,
    requests: Arc<Mutex<Vec<Value>>>,
) -> (String, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("start server");
    let addr = format!("http://{}", server.server_addr());

    let join = thread::spawn(move || {
        let mut receipt_polls = 0usize;
        for _ in 0..32 {
            let mut req = match server.recv() {
                Ok(r) => r,
                Err(_) => break,
            };
            let mut body = String::new();
            let _ = req.as_reader().read_to_string(&mut body);
            let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            if let Ok(mut g) = requests.lock() {
                g.push(request.clone());
            }

            let method = request.get("method").and_then(Value::as_str).unwrap_or_default();
            let payload = match method {
                "eth_call" => {
                    let data = request["params"][0]["data"].as_str().unwrap_or_default();
                    match answers.iter().find(|(selector, _)| data.starts_with(selector)) {
                        Some((_, result)) => json!({"jsonrpc": "2.0", "id": 1, "result": result}),
                        None => json!({
                            "jsonrpc": "2.0",
                            "id": 1,
                            "error": {"code": -32000, "message": "execution reverted"}
                        }),
                    }
                }
                "eth_sendTransaction" => json!({"jsonrpc": "2.0", "id": 1, "result": TX_HASH}),
                "eth_getTransactionReceipt" => {
                    receipt_polls += 1;
                    let receipt = match receipts.status {
                        Some(status) if receipt_polls > receipts.pending_polls => json!({
                            "transactionHash": request["params"][0],
                            "blockNumber": "0x10",
                            "status": status,
                        }),
                        _ => Value::Null,
                    };
                    json!({"jsonrpc": "2.0", "id": 1, "result": receipt})
                }
                _ => json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "error": {"code": -32601, "message": "method not found"}
                }),
            };

            let response =
                Response::from_string(payload.to_string()).with_status_code(StatusCode(200));
            let _ = req.respond(response);
        }
    });

    (addr, join)
}
