pub mod amount;
pub mod emoji;
pub mod flow;
pub mod list;
pub mod ports;

pub use amount::{format_token_amount, parse_token_amount, AmountError};
pub use emoji::{custom_emoji_component, Emoji, IconComponent, CUSTOM_EMOJI_COMPONENTS};
pub use flow::context::FlowContext;
pub use flow::ops::{
    approve, enter_amount, fetch_allowance_and_balance, needs_approval, select_token,
    trigger_top_up,
};
pub use flow::state::TopUpFlowState;
pub use flow::step::{make_step, MessageFn, Step, StepComponent, StepProps};
pub use flow::stepper::{Stepper, StepperStatus};
pub use flow::top_up::{
    success_message, top_up_flow_steps, SharedTokenRegistry, TopUpFlow, MINIMUM_DISPLAY_UNIT,
};
pub use flow::FlowError;
pub use list::{
    ActionHandler, ActionItem, Items, ListImage, ListItem, ListSelect, SelectOutcome,
    SelectableItem,
};
pub use ports::{Erc20Port, PortError, TokenInfo, TokenRegistryPort, TopUpPort};
