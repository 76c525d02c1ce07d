mod common;

use std::sync::{Arc, Mutex};

use alloy::hex;
use alloy::primitives::{B256, U256};
use alloy::sol_types::SolCall;
use serde_json::Value;

use dripdash_adapters::contracts::{IAddressDriver, IERC20};
use dripdash_adapters::{AdapterConfig, ChainAdapter};
use dripdash_core::{Erc20Port, PortError, TopUpPort};

use common::{spawn_mock_node, spawn_mock_node_with, word, Receipts, DAI, TX_HASH};

fn selector(sel: [u8; 4]) -> &'static str {
    Box::leak(format!("0x{}", hex::encode(sel)).into_boxed_str())
}

fn rpc_adapter(url: String) -> (AdapterConfig, ChainAdapter) {
    let config = AdapterConfig {
        rpc_url: Some(url),
        rpc_timeout_ms: 5_000,
        receipt_timeout_ms: 2_000,
        receipt_poll_ms: 10,
        ..AdapterConfig::default()
    };
    let adapter = ChainAdapter::with_config(&config);
    (config, adapter)
}

#[test]
fn reads_allowance_and_balance_with_eth_call() {
    let requests = Arc::new(Mutex::new(Vec::<Value>::new()));
    let answers = vec![
        (selector(IERC20::allowanceCall::SELECTOR), word(42)),
        (selector(IERC20::balanceOfCall::SELECTOR), word(1_000_000)),
    ];
    let (url, _join) = spawn_mock_node(answers, Arc::clone(&requests));
    let (config, chain) = rpc_adapter(url);
    assert!(!chain.is_deterministic());

    let allowance = chain
        .allowance(DAI, config.account, config.driver_address)
        .expect("allowance");
    let balance = chain.balance_of(DAI, config.account).expect("balance");
    assert_eq!(allowance, U256::from(42u8));
    assert_eq!(balance, U256::from(1_000_000u64));

    let calls = requests.lock().expect("requests");
    assert_eq!(calls.len(), 2);
    for call in calls.iter() {
        assert_eq!(call["method"], "eth_call");
        assert_eq!(call["params"][1], "latest");
        let to = call["params"][0]["to"].as_str().expect("to");
        assert!(to.eq_ignore_ascii_case(&DAI.to_string()));
    }
}

#[test]
fn approve_and_top_up_send_transactions_from_the_account() {
    let requests = Arc::new(Mutex::new(Vec::<Value>::new()));
    let (url, _join) = spawn_mock_node(Vec::new(), Arc::clone(&requests));
    let (config, chain) = rpc_adapter(url);
    let expected: B256 = TX_HASH.parse().expect("hash");

    let amount = U256::from(5_000u64);
    assert_eq!(
        chain
            .approve(DAI, config.driver_address, amount)
            .expect("approve"),
        expected
    );
    assert_eq!(chain.top_up(DAI, amount).expect("top up"), expected);

    let calls = requests.lock().expect("requests");
    let methods: Vec<&str> = calls
        .iter()
        .map(|c| c["method"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(
        methods,
        [
            "eth_sendTransaction",
            "eth_getTransactionReceipt",
            "eth_sendTransaction",
            "eth_getTransactionReceipt",
        ]
    );
    assert_eq!(calls[1]["params"][0], TX_HASH);

    let approve_tx = &calls[0]["params"][0];
    assert_eq!(calls[0]["method"], "eth_sendTransaction");
    assert!(approve_tx["from"]
        .as_str()
        .expect("from")
        .eq_ignore_ascii_case(&config.account.to_string()));
    assert!(approve_tx["data"]
        .as_str()
        .expect("data")
        .starts_with(selector(IERC20::approveCall::SELECTOR)));

    let top_up_tx = &calls[2]["params"][0];
    assert!(top_up_tx["to"]
        .as_str()
        .expect("to")
        .eq_ignore_ascii_case(&config.driver_address.to_string()));
    let raw = top_up_tx["data"].as_str().expect("data");
    let data = hex::decode(raw.trim_start_matches("0x")).expect("hex data");
    let decoded = IAddressDriver::setStreamsCall::abi_decode(&data, true).expect("decode");
    assert_eq!(decoded.erc20, DAI);
    assert_eq!(decoded.balanceDelta, 5_000);
    assert!(decoded.currReceivers.is_empty());
    assert_eq!(decoded.transferTo, config.account);
}

#[test]
fn approval_waits_until_the_transaction_is_mined() {
    let requests = Arc::new(Mutex::new(Vec::<Value>::new()));
    let receipts = Receipts {
        pending_polls: 2,
        ..Receipts::default()
    };
    let (url, _join) = spawn_mock_node_with(Vec::new(), receipts, Arc::clone(&requests));
    let (config, chain) = rpc_adapter(url);

    chain
        .approve(DAI, config.driver_address, U256::from(7u8))
        .expect("approve");

    let calls = requests.lock().expect("requests");
    let polls = calls
        .iter()
        .filter(|c| c["method"] == "eth_getTransactionReceipt")
        .count();
    assert_eq!(polls, 3);
}

#[test]
fn reverted_approval_is_an_error() {
    let requests = Arc::new(Mutex::new(Vec::<Value>::new()));
    let receipts = Receipts {
        status: Some("0x0"),
        ..Receipts::default()
    };
    let (url, _join) = spawn_mock_node_with(Vec::new(), receipts, Arc::clone(&requests));
    let (config, chain) = rpc_adapter(url);

    let err = chain
        .approve(DAI, config.driver_address, U256::from(7u8))
        .expect_err("reverted approval");
    assert!(matches!(err, PortError::Transport(ref m) if m.contains("reverted")));
}

#[test]
fn unmined_transaction_times_out() {
    let requests = Arc::new(Mutex::new(Vec::<Value>::new()));
    let receipts = Receipts {
        status: None,
        ..Receipts::default()
    };
    let (url, _join) = spawn_mock_node_with(Vec::new(), receipts, Arc::clone(&requests));
    let config = AdapterConfig {
        rpc_url: Some(url),
        receipt_timeout_ms: 50,
        receipt_poll_ms: 20,
        ..AdapterConfig::default()
    };
    let chain = ChainAdapter::with_config(&config);

    let err = chain.top_up(DAI, U256::from(1u8)).expect_err("never mined");
    assert!(matches!(err, PortError::Transport(ref m) if m.contains("not mined")));
}

#[test]
fn node_errors_surface_as_transport_errors() {
    let requests = Arc::new(Mutex::new(Vec::<Value>::new()));
    let (url, _join) = spawn_mock_node(Vec::new(), Arc::clone(&requests));
    let (config, chain) = rpc_adapter(url);

    let err = chain
        .balance_of(DAI, config.account)
        .expect_err("reverted call");
    assert!(matches!(err, PortError::Transport(ref m) if m.contains("execution reverted")));
}

#[test]
fn seeding_is_refused_outside_the_in_memory_ledger() {
    let (config, chain) = rpc_adapter("http://127.0.0.1:9".to_owned());
    let err = chain
        .seed_balance(DAI, config.account, U256::from(1u8))
        .expect_err("rpc mode");
    assert!(matches!(err, PortError::Policy(_)));
}
