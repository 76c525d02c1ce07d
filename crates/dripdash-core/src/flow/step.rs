use std::fmt;
use std::sync::Arc;

use super::FlowError;

/// Screen a step renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepComponent {
    SelectToken,
    FetchAllowanceAndBalance,
    EnterAmount,
    Approve,
    TriggerTopUpTransaction,
    Success,
}

impl StepComponent {
    pub fn title(&self) -> &'static str {
        match self {
            Self::SelectToken => "Select a token",
            Self::FetchAllowanceAndBalance => "Checking your wallet",
            Self::EnterAmount => "Enter an amount",
            Self::Approve => "Approve token spend",
            Self::TriggerTopUpTransaction => "Confirm top-up",
            Self::Success => "Top-up complete",
        }
    }
}

/// Deferred message, evaluated when the step renders.
pub type MessageFn = Arc<dyn Fn() -> Result<String, FlowError> + Send + Sync>;

#[derive(Clone, Default)]
pub enum StepProps {
    #[default]
    None,
    Success { message: MessageFn },
}

impl StepProps {
    /// Evaluate the success message against the current flow state.
    pub fn message(&self) -> Option<Result<String, FlowError>> {
        match self {
            StepProps::None => None,
            StepProps::Success { message } => Some(message()),
        }
    }
}

impl fmt::Debug for StepProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepProps::None => f.write_str("None"),
            StepProps::Success { .. } => f.write_str("Success { message: <deferred> }"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Step {
    pub component: StepComponent,
    pub props: StepProps,
}

pub fn make_step(component: StepComponent, props: StepProps) -> Step {
    Step { component, props }
}
