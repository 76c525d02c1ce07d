//! UI helper components

use eframe::egui;

use dripdash_core::{Emoji, IconComponent, ListImage};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0, 180, 150);

/// Styled heading with accent color
pub fn styled_heading(ui: &mut egui::Ui, text: &str) {
    ui.heading(egui::RichText::new(text).color(egui::Color32::from_rgb(0, 212, 170)));
}

/// Copy to clipboard
pub fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(text) {
                tracing::warn!(error = %e, "clipboard write failed");
            }
        }
        Err(e) => tracing::warn!(error = %e, "clipboard unavailable"),
    }
}

/// Display a hash value with copy button
pub fn copyable_hash(ui: &mut egui::Ui, label: &str, hash: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(format!("{}:", label)).strong());
        ui.label(egui::RichText::new(hash).monospace());
        if ui
            .small_button("📋")
            .on_hover_text("Copy to clipboard")
            .clicked()
        {
            copy_to_clipboard(hash);
        }
    });
}

pub fn loading_spinner(ui: &mut egui::Ui, text: &str) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(text);
    });
}

pub fn error_message(ui: &mut egui::Ui, message: &str) {
    ui.horizontal(|ui| {
        icon(ui, Emoji::Warning.icon(), 16.0);
        ui.label(egui::RichText::new(message).color(egui::Color32::from_rgb(220, 80, 80)));
    });
}

pub fn success_message(ui: &mut egui::Ui, message: &str) {
    ui.horizontal(|ui| {
        icon(ui, Emoji::Check.icon(), 16.0);
        ui.label(egui::RichText::new(message).color(egui::Color32::from_rgb(80, 200, 120)));
    });
}

pub fn info_message(ui: &mut egui::Ui, message: &str) {
    ui.horizontal(|ui| {
        icon(ui, Emoji::Monocle.icon(), 14.0);
        ui.label(egui::RichText::new(message).weak());
    });
}

// =============================================================================
// ICONS
// =============================================================================

/// Draw a registered icon as its tinted glyph.
pub fn icon(ui: &mut egui::Ui, component: &IconComponent, size: f32) -> egui::Response {
    let [r, g, b] = component.tint;
    ui.label(
        egui::RichText::new(component.glyph)
            .size(size)
            .color(egui::Color32::from_rgb(r, g, b)),
    )
    .on_hover_text(component.name)
}

/// Draw a list row image. Remote images are not fetched; the URL shows on hover.
pub fn list_image(ui: &mut egui::Ui, image: &ListImage) {
    match image {
        ListImage::Url(url) => {
            ui.label(egui::RichText::new("🖼").size(16.0).weak())
                .on_hover_text(url.as_str());
        }
        ListImage::Component { component, props } => {
            let size = props
                .get("size")
                .and_then(serde_json::Value::as_f64)
                .map(|s| s as f32)
                .unwrap_or(16.0);
            icon(ui, component, size);
        }
    }
}

// =============================================================================
// STYLED BUTTONS
// =============================================================================

/// Primary action button - accent colored, prominent
pub fn primary_button(ui: &mut egui::Ui, text: &str) -> egui::Response {
    primary_button_enabled(ui, text, true)
}

pub fn primary_button_enabled(ui: &mut egui::Ui, text: &str, enabled: bool) -> egui::Response {
    let btn = egui::Button::new(egui::RichText::new(text).size(14.0).color(egui::Color32::WHITE))
        .min_size(egui::vec2(130.0, 34.0))
        .fill(ACCENT);
    ui.add_enabled(enabled, btn)
}

/// Secondary action button - subdued, outline style
pub fn secondary_button(ui: &mut egui::Ui, text: &str) -> egui::Response {
    let btn = egui::Button::new(egui::RichText::new(text).size(14.0))
        .min_size(egui::vec2(90.0, 34.0));
    ui.add(btn)
}

// =============================================================================
// VISUAL GROUPING
// =============================================================================

/// Render content in a subtle card/frame
pub fn card(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(ui.visuals().faint_bg_color)
        .rounding(6.0)
        .inner_margin(12.0)
        .show(ui, add_contents);
}
