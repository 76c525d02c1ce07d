use alloy::primitives::{Address, B256, U256};

/// Data collected while the top-up wizard runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopUpFlowState {
    pub token_address: Option<Address>,
    pub amount_to_top_up: Option<U256>,
    pub allowance: Option<U256>,
    pub balance: Option<U256>,
    pub approval_tx_hash: Option<B256>,
    pub top_up_tx_hash: Option<B256>,
}

impl TopUpFlowState {
    /// Blank state, optionally seeded with a token.
    pub fn seeded(token_address: Option<Address>) -> Self {
        Self {
            token_address,
            ..Self::default()
        }
    }
}
