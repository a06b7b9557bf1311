// src/gui/components/tabs.rs
//
// Category tabs with live counts. Switching clears nothing; the search term
// carries over.

use eframe::egui;
use crate::{gui::app::App, model::Category};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let cur = app.category();
        for cat in Category::ALL {
            let selected = cat == cur;
            let text = format!("{} ({})", cat.label(), app.data.count(cat));
            if ui.selectable_label(selected, text).clicked() && !selected {
                logf!("UI: Tab switch {} → {}", cur, cat);
                app.state.gui.category = cat;
            }
        }
    });
}
