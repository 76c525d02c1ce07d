//! DripDash: a Rust-native token streaming dashboard

use eframe::egui;

mod app;
mod bridge;
mod list_select;
mod state;
mod top_up;
mod ui;

fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!(
        git = env!("GIT_HASH"),
        built = env!("BUILD_TIME"),
        "Starting DripDash"
    );

    let config = dripdash_adapters::AdapterConfig::from_env();
    let bridge = bridge::Bridge::from_config(config)?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("DripDash")
            .with_inner_size([820.0, 640.0])
            .with_min_inner_size([520.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "DripDash",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::App::new(cc, bridge)))),
    )
    .map_err(|e| eyre::eyre!("failed to run DripDash window: {e}"))
}
