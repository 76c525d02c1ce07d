//! Bridge between the egui shell and the workspace crates.
//! All chain and token-list access from the UI goes through here.

use std::sync::Arc;

use alloy::primitives::{Address, B256, U256};
use eyre::WrapErr;

use dripdash_adapters::{AdapterConfig, ChainAdapter, TokenListAdapter};
use dripdash_core::{
    approve, fetch_allowance_and_balance, trigger_top_up, Erc20Port, FlowContext, FlowError,
    SharedTokenRegistry, TokenInfo, TokenRegistryPort, TopUpFlowState,
};

#[derive(Clone)]
pub struct Bridge {
    tokens: Arc<TokenListAdapter>,
    chain: Arc<ChainAdapter>,
}

impl Bridge {
    pub fn from_config(config: AdapterConfig) -> eyre::Result<Self> {
        let tokens = match config.token_list_path {
            Some(ref path) => TokenListAdapter::from_path(path, config.chain_id)
                .wrap_err_with(|| format!("loading token list {}", path.display()))?,
            None => TokenListAdapter::builtin(config.chain_id),
        };
        let chain = ChainAdapter::seeded(&config, &tokens);
        tracing::info!(
            chain_id = config.chain_id,
            backend = %chain.describe(),
            tokens = tokens.tokens().len(),
            "bridge ready"
        );
        Ok(Self {
            tokens: Arc::new(tokens),
            chain: Arc::new(chain),
        })
    }

    pub fn tokens(&self) -> SharedTokenRegistry {
        self.tokens.clone()
    }

    pub fn registry(&self) -> &TokenListAdapter {
        &self.tokens
    }

    pub fn token_list(&self) -> Vec<TokenInfo> {
        self.tokens.tokens()
    }

    pub fn token(&self, address: Address) -> Option<TokenInfo> {
        self.tokens.get_by_address(address)
    }

    pub fn backend_label(&self) -> String {
        self.chain.describe()
    }

    pub fn backend_ready(&self) -> bool {
        self.chain.is_enabled()
    }

    pub fn account(&self) -> Address {
        self.chain.account()
    }

    pub fn balances(&self) -> Vec<(Address, Result<U256, String>)> {
        let owner = self.chain.account();
        self.tokens
            .tokens()
            .into_iter()
            .map(|token| {
                let balance = self
                    .chain
                    .balance_of(token.address, owner)
                    .map_err(|e| e.to_string());
                if let Err(ref e) = balance {
                    tracing::warn!(token = %token.address, error = %e, "balance fetch failed");
                }
                (token.address, balance)
            })
            .collect()
    }

    pub fn fetch_allowance_and_balance(
        &self,
        context: &FlowContext<TopUpFlowState>,
    ) -> Result<(U256, U256), FlowError> {
        fetch_allowance_and_balance(
            context,
            self.chain.as_ref(),
            self.chain.account(),
            self.chain.driver(),
        )
    }

    pub fn approve(&self, context: &FlowContext<TopUpFlowState>) -> Result<Option<B256>, FlowError> {
        approve(context, self.chain.as_ref(), self.chain.driver())
    }

    pub fn top_up(&self, context: &FlowContext<TopUpFlowState>) -> Result<B256, FlowError> {
        trigger_top_up(context, self.chain.as_ref())
    }
}
