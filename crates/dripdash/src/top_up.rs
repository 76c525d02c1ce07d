//! Top-up wizard panel
//!
//! Drives a `Stepper` over the steps built by `top_up_flow_steps`. Chain
//! calls run on a worker thread; the result lands in a shared slot that the
//! panel polls each frame before advancing.

use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, B256, U256};
use eframe::egui;

use dripdash_core::{
    enter_amount, format_token_amount, needs_approval, select_token, top_up_flow_steps, Emoji,
    FlowContext, Items, ListImage, ListSelect, SelectableItem, StepComponent, StepProps, Stepper,
    TokenInfo, TopUpFlowState, MINIMUM_DISPLAY_UNIT,
};

use crate::bridge::Bridge;
use crate::list_select;
use crate::state::WizardUiState;
use crate::ui;

enum TaskResult {
    Fetched(Result<(U256, U256), String>),
    Approved(Result<Option<B256>, String>),
    ToppedUp(Result<B256, String>),
}

pub struct TopUpWizard {
    context: FlowContext<TopUpFlowState>,
    stepper: Stepper,
    state: WizardUiState,
    token_select: ListSelect,
    task_result: Arc<Mutex<Option<TaskResult>>>,
}

impl TopUpWizard {
    /// Start a run, with `token` preselected or not.
    pub fn start(
        bridge: &Bridge,
        context: &FlowContext<TopUpFlowState>,
        token: Option<Address>,
    ) -> Self {
        let flow = top_up_flow_steps(context, bridge.tokens(), token);
        tracing::info!(?token, steps = flow.steps.len(), "top-up wizard opened");

        let tokens = bridge.token_list();
        let mut items = Items::new();
        for token in &tokens {
            let item = SelectableItem::new(token.name.clone())
                .with_text(token.symbol.clone())
                .with_image(token_image(token));
            items.insert(token.address.to_string(), item);
        }
        let order = tokens.iter().map(|t| t.address.to_string());

        Self {
            context: flow.context,
            stepper: Stepper::new(flow.steps),
            state: WizardUiState::default(),
            token_select: ListSelect::new(items, order),
            task_result: Arc::new(Mutex::new(None)),
        }
    }

    pub fn is_open(&self) -> bool {
        self.stepper.is_running()
    }

    /// Draw the active step. Returns `false` once the run has finished or was cancelled.
    pub fn show(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, bridge: &Bridge) -> bool {
        self.check_task_result();

        let Some(step) = self.stepper.current().cloned() else {
            return false;
        };

        let (position, total) = self.stepper.position();
        ui.horizontal(|ui| {
            ui::icon(ui, Emoji::Pour.icon(), 20.0);
            ui::styled_heading(ui, step.component.title());
        });
        ui.label(egui::RichText::new(format!("Step {} of {}", position, total)).weak());
        ui.add_space(10.0);

        match step.component {
            StepComponent::SelectToken => self.show_select_token(ui, ctx, bridge),
            StepComponent::FetchAllowanceAndBalance => self.show_fetch(ui, ctx, bridge),
            StepComponent::EnterAmount => self.show_enter_amount(ui, bridge),
            StepComponent::Approve => self.show_approve(ui, ctx, bridge),
            StepComponent::TriggerTopUpTransaction => self.show_trigger(ui, ctx, bridge),
            StepComponent::Success => self.show_success(ui, &step.props),
        }

        ui.add_space(10.0);
        if let Some(error) = self.state.error.clone() {
            ui::error_message(ui, &error);
        }
        if let Some(info) = self.state.info.clone() {
            ui::info_message(ui, &info);
        }

        if step.component != StepComponent::Success && !self.state.busy {
            ui.add_space(6.0);
            if ui::secondary_button(ui, "Cancel").clicked() {
                self.stepper.cancel();
                tracing::info!("top-up wizard cancelled");
            }
        }

        self.is_open()
    }

    fn show_select_token(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, bridge: &Bridge) {
        ui.label("Which token would you like to top up?");
        ui.add_space(6.0);
        list_select::show(ui, &mut self.token_select, true);

        let chosen = self
            .token_select
            .selected()
            .first()
            .and_then(|slug| slug.parse::<Address>().ok());

        ui.add_space(8.0);
        if self.state.busy {
            ui::loading_spinner(ui, "Fetching allowance and balance…");
        } else if ui::primary_button_enabled(ui, "Continue", chosen.is_some()).clicked() {
            if let Some(token) = chosen {
                select_token(&self.context, token);
                self.spawn_fetch(ctx, bridge);
            }
        }
    }

    fn show_fetch(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, bridge: &Bridge) {
        if !self.state.fetch_started {
            self.state.fetch_started = true;
            self.spawn_fetch(ctx, bridge);
        }

        if self.state.busy {
            ui::loading_spinner(ui, "Fetching allowance and balance…");
        } else if self.state.error.is_some() && ui::primary_button(ui, "Retry").clicked() {
            self.spawn_fetch(ctx, bridge);
        }
    }

    fn show_enter_amount(&mut self, ui: &mut egui::Ui, bridge: &Bridge) {
        let flow = self.context.get();
        let Some(token) = flow.token_address.and_then(|a| bridge.token(a)) else {
            ui::error_message(ui, "No token selected");
            return;
        };
        let balance = flow.balance.unwrap_or(U256::ZERO);

        ui.horizontal(|ui| {
            ui::icon(ui, Emoji::Purse.icon(), 16.0);
            ui.label(format!(
                "Wallet balance: {} {}",
                format_token_amount(balance, token.decimals, MINIMUM_DISPLAY_UNIT),
                token.symbol
            ));
        });
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            ui.label("Amount:");
            ui.add(
                egui::TextEdit::singleline(&mut self.state.amount_input)
                    .hint_text("0.0")
                    .desired_width(180.0),
            );
            ui.label(token.symbol.as_str());
            if ui.small_button("Max").clicked() {
                self.state.amount_input =
                    format_token_amount(balance, token.decimals, U256::ZERO);
            }
        });

        ui.add_space(8.0);
        if ui::primary_button(ui, "Continue").clicked() {
            match enter_amount(&self.context, bridge.registry(), &self.state.amount_input) {
                Ok(amount) => {
                    tracing::debug!(%amount, "amount entered");
                    self.advance();
                }
                Err(e) => self.state.set_error(e.to_string()),
            }
        }
    }

    fn show_approve(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, bridge: &Bridge) {
        let flow = self.context.get();
        let summary = amount_summary(&flow, bridge);
        let needed = match needs_approval(&flow) {
            Ok(needed) => needed,
            Err(e) => {
                ui::error_message(ui, &e.to_string());
                return;
            }
        };

        let label = if needed {
            ui.horizontal(|ui| {
                ui::icon(ui, Emoji::Lock.icon(), 16.0);
                ui.label(format!(
                    "DripDash needs permission to move {} from your wallet.",
                    summary
                ));
            });
            "Approve"
        } else {
            ui.label(format!("Your allowance already covers {}.", summary));
            "Continue"
        };

        ui.add_space(8.0);
        if self.state.busy {
            ui::loading_spinner(ui, "Waiting for the approval to confirm…");
        } else if ui::primary_button(ui, label).clicked() {
            let bridge = bridge.clone();
            let context = self.context.clone();
            self.spawn(ctx, move || {
                TaskResult::Approved(bridge.approve(&context).map_err(|e| e.to_string()))
            });
        }
    }

    fn show_trigger(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, bridge: &Bridge) {
        let flow = self.context.get();
        ui.horizontal(|ui| {
            ui::icon(ui, Emoji::FlyingMoney.icon(), 16.0);
            ui.label(format!(
                "Add {} to your streaming balance.",
                amount_summary(&flow, bridge)
            ));
        });
        if let Some(hash) = flow.approval_tx_hash {
            ui::copyable_hash(ui, "Approval", &hash.to_string());
        }

        ui.add_space(8.0);
        if self.state.busy {
            ui::loading_spinner(ui, "Waiting for the top-up to confirm…");
        } else if ui::primary_button(ui, "Top up").clicked() {
            let bridge = bridge.clone();
            let context = self.context.clone();
            self.spawn(ctx, move || {
                TaskResult::ToppedUp(bridge.top_up(&context).map_err(|e| e.to_string()))
            });
        }
    }

    fn show_success(&mut self, ui: &mut egui::Ui, props: &StepProps) {
        match props.message() {
            Some(Ok(message)) => ui::success_message(ui, &message),
            Some(Err(e)) => ui::error_message(ui, &format!("Top-up summary unavailable: {}", e)),
            None => {}
        }
        if let Some(hash) = self.context.read(|s| s.top_up_tx_hash) {
            ui.add_space(6.0);
            ui::copyable_hash(ui, "Transaction", &hash.to_string());
        }

        ui.add_space(8.0);
        if ui::primary_button(ui, "Done").clicked() {
            self.advance();
        }
    }

    fn spawn_fetch(&mut self, ctx: &egui::Context, bridge: &Bridge) {
        let bridge = bridge.clone();
        let context = self.context.clone();
        self.spawn(ctx, move || {
            TaskResult::Fetched(
                bridge
                    .fetch_allowance_and_balance(&context)
                    .map_err(|e| e.to_string()),
            )
        });
    }

    fn spawn<F>(&mut self, ctx: &egui::Context, task: F)
    where
        F: FnOnce() -> TaskResult + Send + 'static,
    {
        self.state.start_task();
        let slot = Arc::clone(&self.task_result);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let result = task();
            if let Ok(mut guard) = slot.lock() {
                *guard = Some(result);
            }
            ctx.request_repaint();
        });
    }

    fn check_task_result(&mut self) {
        let result = match self.task_result.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        let Some(result) = result else {
            return;
        };
        self.state.finish_task();

        let (outcome, notice) = match result {
            TaskResult::Fetched(r) => (r.map(|_| ()), None),
            TaskResult::Approved(r) => {
                let notice = r
                    .as_ref()
                    .ok()
                    .and_then(|hash| hash.map(|_| "Approval confirmed.".to_string()));
                (r.map(|_| ()), notice)
            }
            TaskResult::ToppedUp(r) => (r.map(|_| ()), None),
        };
        match outcome {
            Ok(()) => {
                self.advance();
                if let Some(notice) = notice {
                    self.state.set_info(notice);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "top-up step failed");
                self.state.set_error(e);
            }
        }
    }

    fn advance(&mut self) {
        self.state.next_step();
        if let Err(e) = self.stepper.advance() {
            tracing::warn!(error = %e, "could not advance top-up wizard");
        }
    }
}

fn token_image(token: &TokenInfo) -> ListImage {
    match token.logo_uri {
        Some(ref uri) => ListImage::Url(uri.clone()),
        None => ListImage::icon(*Emoji::MoneyBag.icon()),
    }
}

fn amount_summary(flow: &TopUpFlowState, bridge: &Bridge) -> String {
    let token = flow.token_address.and_then(|a| bridge.token(a));
    match (flow.amount_to_top_up, token) {
        (Some(amount), Some(token)) => format!(
            "{} {}",
            format_token_amount(amount, token.decimals, MINIMUM_DISPLAY_UNIT),
            token.symbol
        ),
        _ => "the entered amount".to_string(),
    }
}
