//! UI-side state for the dashboard and the top-up wizard

use std::collections::HashMap;

use alloy::primitives::{Address, U256};
use dripdash_core::{format_token_amount, TokenInfo, MINIMUM_DISPLAY_UNIT};

/// Transient state of the wizard panel. Flow data lives in the flow context.
#[derive(Debug, Default)]
pub struct WizardUiState {
    pub amount_input: String,
    pub busy: bool,
    pub fetch_started: bool,
    pub error: Option<String>,
    pub info: Option<String>,
}

impl WizardUiState {
    pub fn start_task(&mut self) {
        self.busy = true;
        self.error = None;
    }

    pub fn finish_task(&mut self) {
        self.busy = false;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.info = None;
    }

    pub fn set_info(&mut self, info: impl Into<String>) {
        self.info = Some(info.into());
    }

    /// Notices belong to the step that raised them.
    pub fn next_step(&mut self) {
        self.error = None;
        self.info = None;
    }
}

/// Balances shown on the dashboard, keyed by token address.
#[derive(Debug, Default)]
pub struct DashboardState {
    pub balances: HashMap<Address, Result<U256, String>>,
    pub loading: bool,
}

impl DashboardState {
    pub fn apply_balances(&mut self, balances: Vec<(Address, Result<U256, String>)>) {
        self.balances = balances.into_iter().collect();
        self.loading = false;
    }

    pub fn balance(&self, token: Address) -> Option<U256> {
        self.balances.get(&token).and_then(|b| b.as_ref().ok()).copied()
    }

    pub fn balance_label(&self, token: &TokenInfo) -> String {
        match self.balances.get(&token.address) {
            Some(Ok(balance)) => format!(
                "{} {}",
                format_token_amount(*balance, token.decimals, MINIMUM_DISPLAY_UNIT),
                token.symbol
            ),
            Some(Err(_)) => "balance unavailable".to_string(),
            None if self.loading => "loading…".to_string(),
            None => "-".to_string(),
        }
    }
}
