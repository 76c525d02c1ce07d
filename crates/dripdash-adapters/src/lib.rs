pub mod chain;
pub mod config;
pub mod contracts;
pub mod rpc;
pub mod token_list;

pub use chain::ChainAdapter;
pub use config::AdapterConfig;
pub use rpc::JsonRpcClient;
pub use token_list::TokenListAdapter;
