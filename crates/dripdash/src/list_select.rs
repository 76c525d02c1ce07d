//! egui rendering for `ListSelect`

use eframe::egui;

use dripdash_core::{ListItem, ListSelect, SelectOutcome};

use crate::ui;

/// Draw the list and apply any click. Disabled rows stay visible but do not react.
pub fn show(
    ui: &mut egui::Ui,
    list: &mut ListSelect,
    searchable: bool,
) -> Option<SelectOutcome> {
    if searchable {
        ui.horizontal(|ui| {
            ui.label("🔍");
            ui.add(
                egui::TextEdit::singleline(list.search_mut())
                    .hint_text("Search")
                    .desired_width(220.0),
            );
        });
        ui.add_space(4.0);
    }

    let slugs: Vec<String> = list
        .visible_slugs()
        .into_iter()
        .map(str::to_owned)
        .collect();
    if slugs.is_empty() {
        ui.label(egui::RichText::new("Nothing matches").weak());
        return None;
    }

    let mut clicked = None;
    for slug in &slugs {
        let Some(item) = list.items().get(slug) else {
            continue;
        };
        let selected = list.is_selected(slug);

        ui.horizontal(|ui| {
            if let Some(image) = item.image() {
                ui::list_image(ui, image);
            }
            let label = match item {
                ListItem::Selectable(_) => egui::RichText::new(item.label()),
                ListItem::Action(_) => egui::RichText::new(item.label()).strong(),
            };
            let response =
                ui.add_enabled(!item.is_disabled(), egui::SelectableLabel::new(selected, label));
            if let Some(text) = item.text() {
                ui.label(egui::RichText::new(text).weak());
            }
            if response.clicked() {
                clicked = Some(slug.clone());
            }
        });
    }

    clicked.map(|slug| list.select(&slug))
}
