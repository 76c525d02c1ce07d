//! Top-up flow sequencer

use std::sync::Arc;

use alloy::primitives::{Address, U256};

use super::context::FlowContext;
use super::state::TopUpFlowState;
use super::step::{make_step, Step, StepComponent, StepProps};
use super::FlowError;
use crate::amount::format_token_amount;
use crate::ports::TokenRegistryPort;

/// Amounts below one base unit are shown as `<` the unit.
pub const MINIMUM_DISPLAY_UNIT: U256 = U256::from_limbs([1, 0, 0, 0]);

pub type SharedTokenRegistry = Arc<dyn TokenRegistryPort + Send + Sync>;

/// Steps of a top-up run and the state they share.
#[derive(Debug, Clone)]
pub struct TopUpFlow {
    pub context: FlowContext<TopUpFlowState>,
    pub steps: Vec<Step>,
}

/// Build the top-up wizard.
///
/// Resets `context` to a blank state seeded with `token_address`. With a
/// token already chosen the first step fetches its allowance and balance,
/// otherwise the user picks a token first.
pub fn top_up_flow_steps(
    context: &FlowContext<TopUpFlowState>,
    tokens: SharedTokenRegistry,
    token_address: Option<Address>,
) -> TopUpFlow {
    context.set(TopUpFlowState::seeded(token_address));
    tracing::debug!(?token_address, "building top-up flow");

    let first = match token_address {
        Some(_) => make_step(StepComponent::FetchAllowanceAndBalance, StepProps::None),
        None => make_step(StepComponent::SelectToken, StepProps::None),
    };

    let message_context = context.clone();
    let success = make_step(
        StepComponent::Success,
        StepProps::Success {
            message: Arc::new(move || {
                success_message(&message_context.get(), tokens.as_ref())
            }),
        },
    );

    TopUpFlow {
        context: context.clone(),
        steps: vec![
            first,
            make_step(StepComponent::EnterAmount, StepProps::None),
            make_step(StepComponent::Approve, StepProps::None),
            make_step(StepComponent::TriggerTopUpTransaction, StepProps::None),
            success,
        ],
    }
}

/// Message shown once the top-up transaction went through.
///
/// A zero amount counts as missing.
pub fn success_message(
    state: &TopUpFlowState,
    tokens: &dyn TokenRegistryPort,
) -> Result<String, FlowError> {
    let token_address = state
        .token_address
        .ok_or(FlowError::MissingState("tokenAddress"))?;
    let amount = state
        .amount_to_top_up
        .filter(|amount| !amount.is_zero())
        .ok_or(FlowError::MissingState("amountToTopUp"))?;

    let token = tokens
        .get_by_address(token_address)
        .ok_or(FlowError::UnknownToken(token_address))?;

    let formatted = format_token_amount(amount, token.decimals, MINIMUM_DISPLAY_UNIT);
    Ok(format!(
        "You've successfully topped up {} {}. \
         It may take some time for your balance to update on your dashboard.",
        formatted, token.name
    ))
}
