//! Main application state and update loop

use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, U256};
use eframe::egui;

use dripdash_core::{
    ActionItem, Emoji, FlowContext, Items, ListImage, ListSelect, SelectOutcome, TopUpFlowState,
};

use crate::bridge::Bridge;
use crate::list_select;
use crate::state::DashboardState;
use crate::top_up::TopUpWizard;
use crate::ui;

type BalanceResult = Vec<(Address, Result<U256, String>)>;

pub struct App {
    bridge: Bridge,
    flow_context: FlowContext<TopUpFlowState>,
    dashboard: DashboardState,
    token_rows: ListSelect,
    wizard: Option<TopUpWizard>,
    /// Set by a row's "Top up" action, consumed on the next frame.
    top_up_request: Arc<Mutex<Option<Address>>>,
    balance_result: Arc<Mutex<Option<BalanceResult>>>,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, bridge: Bridge) -> Self {
        let mut app = Self {
            bridge,
            flow_context: FlowContext::default(),
            dashboard: DashboardState::default(),
            token_rows: ListSelect::new(Items::new(), Vec::<String>::new()),
            wizard: None,
            top_up_request: Arc::new(Mutex::new(None)),
            balance_result: Arc::new(Mutex::new(None)),
        };
        app.rebuild_rows();
        app.refresh_balances(&cc.egui_ctx);
        app
    }

    fn refresh_balances(&mut self, ctx: &egui::Context) {
        if self.dashboard.loading {
            return;
        }
        self.dashboard.loading = true;
        self.rebuild_rows();

        let bridge = self.bridge.clone();
        let result = Arc::clone(&self.balance_result);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let balances = bridge.balances();
            if let Ok(mut guard) = result.lock() {
                *guard = Some(balances);
            }
            ctx.request_repaint();
        });
    }

    fn check_balance_result(&mut self) {
        let balances = match self.balance_result.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        if let Some(balances) = balances {
            tracing::debug!(count = balances.len(), "balances refreshed");
            self.dashboard.apply_balances(balances);
            self.rebuild_rows();
        }
    }

    fn rebuild_rows(&mut self) {
        let backend_ready = self.bridge.backend_ready();
        let tokens = self.bridge.token_list();

        let mut items = Items::new();
        for token in &tokens {
            let request = Arc::clone(&self.top_up_request);
            let address = token.address;
            let funded = self
                .dashboard
                .balance(address)
                .is_some_and(|balance| !balance.is_zero());
            let label = format!(
                "{}  {}",
                token.name,
                self.dashboard.balance_label(token)
            );
            let row = ActionItem::new(label, move || {
                if let Ok(mut guard) = request.lock() {
                    *guard = Some(address);
                }
            })
            .with_image(ListImage::icon(*Emoji::MoneyBag.icon()))
            .disabled(!backend_ready || !funded);
            items.insert(address.to_string(), row);
        }
        self.token_rows
            .set_items(items, tokens.iter().map(|t| t.address.to_string()));
    }

    fn take_top_up_request(&mut self) -> Option<Address> {
        match self.top_up_request.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        }
    }

    fn open_wizard(&mut self, token: Option<Address>) {
        if self.wizard.is_none() {
            self.wizard = Some(TopUpWizard::start(&self.bridge, &self.flow_context, token));
        }
    }

    fn render_dashboard(&mut self, ui: &mut egui::Ui) {
        ui::styled_heading(ui, "Your tokens");
        ui.label("Click a token to top up its streaming balance.");
        ui.add_space(10.0);

        ui::card(ui, |ui| {
            if let Some(SelectOutcome::ActionInvoked(slug)) =
                list_select::show(ui, &mut self.token_rows, true)
            {
                tracing::debug!(%slug, "top-up requested from dashboard");
                ui.ctx().request_repaint();
            }
        });

        ui.add_space(12.0);
        if ui::primary_button(ui, "Top up").clicked() {
            self.open_wizard(None);
        }
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!(
                    "{} · {}",
                    env!("GIT_HASH"),
                    env!("BUILD_TIME")
                ))
                .small()
                .weak(),
            );
            ui.separator();
            ui.label(
                egui::RichText::new(format!("account {}", self.bridge.account()))
                    .small()
                    .monospace()
                    .weak(),
            );
        });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        // Check for async balance results
        self.check_balance_result();

        if let Some(token) = self.take_top_up_request() {
            self.open_wizard(Some(token));
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading(
                    egui::RichText::new(format!("{} DripDash", Emoji::Jar.glyph()))
                        .size(22.0)
                        .color(egui::Color32::from_rgb(0, 212, 170)),
                );
                ui.add_space(30.0);
                ui.separator();
                ui.label(egui::RichText::new(self.bridge.backend_label()).weak());
                if self.wizard.is_none() && ui.small_button("⟳ Refresh").clicked() {
                    self.refresh_balances(ctx);
                }
            });
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_footer(ui);
            ui.add_space(4.0);
        });

        let mut wizard_closed = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(10.0);
                match self.wizard {
                    Some(ref mut wizard) => {
                        ui::card(ui, |ui| {
                            wizard_closed = !wizard.show(ui, ctx, &self.bridge);
                        });
                    }
                    None => self.render_dashboard(ui),
                }
                ui.add_space(20.0);
            });
        });

        if wizard_closed {
            self.wizard = None;
            self.refresh_balances(ctx);
        }
    }
}
