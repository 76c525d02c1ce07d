//! Top-up wizard flow
//!
//! The sequencer builds the ordered step list, the stepper walks it forward,
//! and the step operations read and write the shared `TopUpFlowState`.

pub mod context;
pub mod ops;
pub mod state;
pub mod step;
pub mod stepper;
pub mod top_up;

use alloy::primitives::{Address, U256};
use thiserror::Error;

use crate::amount::AmountError;
use crate::ports::PortError;

#[derive(Debug, Error)]
pub enum FlowError {
    /// A step ran before an earlier step populated the field it needs.
    #[error("flow state is missing {0}")]
    MissingState(&'static str),
    #[error("token {0} is not in the token registry")]
    UnknownToken(Address),
    #[error("flow is not running")]
    NotRunning,
    #[error("amount must be greater than zero")]
    ZeroAmount,
    #[error("amount exceeds available balance")]
    InsufficientBalance { requested: U256, available: U256 },
    #[error(transparent)]
    Amount(#[from] AmountError),
    #[error(transparent)]
    Port(#[from] PortError),
}
