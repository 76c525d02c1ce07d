//! Operations behind each top-up step
//!
//! Each step screen calls one of these. They validate against what earlier
//! steps stored and write their own results back into the flow state.

use alloy::primitives::{Address, B256, U256};

use super::context::FlowContext;
use super::state::TopUpFlowState;
use super::FlowError;
use crate::amount::parse_token_amount;
use crate::ports::{Erc20Port, TokenRegistryPort, TopUpPort};

type Context = FlowContext<TopUpFlowState>;

/// Pick the token to top up. Anything derived from a previous pick is dropped.
pub fn select_token(context: &Context, token: Address) {
    context.set(TopUpFlowState::seeded(Some(token)));
}

/// Read the connected account's allowance for `spender` and its balance.
pub fn fetch_allowance_and_balance<E: Erc20Port + ?Sized>(
    context: &Context,
    erc20: &E,
    owner: Address,
    spender: Address,
) -> Result<(U256, U256), FlowError> {
    let token = context
        .read(|s| s.token_address)
        .ok_or(FlowError::MissingState("tokenAddress"))?;

    let allowance = erc20.allowance(token, owner, spender)?;
    let balance = erc20.balance_of(token, owner)?;
    tracing::debug!(%token, %allowance, %balance, "fetched allowance and balance");

    context.update(|s| {
        s.allowance = Some(allowance);
        s.balance = Some(balance);
    });
    Ok((allowance, balance))
}

/// Parse and store the amount the user typed.
pub fn enter_amount(
    context: &Context,
    tokens: &dyn TokenRegistryPort,
    input: &str,
) -> Result<U256, FlowError> {
    let state = context.get();
    let token_address = state
        .token_address
        .ok_or(FlowError::MissingState("tokenAddress"))?;
    let token = tokens
        .get_by_address(token_address)
        .ok_or(FlowError::UnknownToken(token_address))?;

    let amount = parse_token_amount(input, token.decimals)?;
    if amount.is_zero() {
        return Err(FlowError::ZeroAmount);
    }
    if let Some(available) = state.balance {
        if amount > available {
            return Err(FlowError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
    }

    context.update(|s| s.amount_to_top_up = Some(amount));
    Ok(amount)
}

/// Whether the current allowance falls short of the amount.
pub fn needs_approval(state: &TopUpFlowState) -> Result<bool, FlowError> {
    let amount = state
        .amount_to_top_up
        .ok_or(FlowError::MissingState("amountToTopUp"))?;
    let allowance = state
        .allowance
        .ok_or(FlowError::MissingState("allowance"))?;
    Ok(allowance < amount)
}

/// Approve `spender` for exactly the entered amount.
///
/// Returns `None` without sending anything when the allowance already
/// covers the amount.
pub fn approve<E: Erc20Port + ?Sized>(
    context: &Context,
    erc20: &E,
    spender: Address,
) -> Result<Option<B256>, FlowError> {
    let state = context.get();
    if !needs_approval(&state)? {
        return Ok(None);
    }
    let token = state
        .token_address
        .ok_or(FlowError::MissingState("tokenAddress"))?;
    let amount = state
        .amount_to_top_up
        .ok_or(FlowError::MissingState("amountToTopUp"))?;

    let tx_hash = erc20.approve(token, spender, amount)?;
    tracing::info!(%token, %spender, %amount, %tx_hash, "approval submitted");

    context.update(|s| {
        s.allowance = Some(amount);
        s.approval_tx_hash = Some(tx_hash);
    });
    Ok(Some(tx_hash))
}

/// Submit the top-up transaction.
pub fn trigger_top_up<T: TopUpPort + ?Sized>(
    context: &Context,
    top_up: &T,
) -> Result<B256, FlowError> {
    let state = context.get();
    let token = state
        .token_address
        .ok_or(FlowError::MissingState("tokenAddress"))?;
    let amount = state
        .amount_to_top_up
        .ok_or(FlowError::MissingState("amountToTopUp"))?;
    if needs_approval(&state)? {
        return Err(FlowError::MissingState("approval"));
    }

    let tx_hash = top_up.top_up(token, amount)?;
    tracing::info!(%token, %amount, %tx_hash, "top-up submitted");

    context.update(|s| s.top_up_tx_hash = Some(tx_hash));
    Ok(tx_hash)
}
