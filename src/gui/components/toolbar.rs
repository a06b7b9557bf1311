// src/gui/components/toolbar.rs

use eframe::egui;
use crate::{
    config::options::ExportFormat,
    gui::{actions, app::App},
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        ui.label("Search:");
        ui.add(egui::TextEdit::singleline(&mut app.state.gui.search)
            .hint_text("any field")
            .desired_width(180.0));
        if !app.state.gui.search.is_empty() && ui.small_button("✕").clicked() {
            app.state.gui.search.clear();
        }
    });

    ui.horizontal(|ui| {
        let export = &mut app.state.options.export;
        let prev = export.format;
        ui.label("Format:");
        ui.selectable_value(&mut export.format, ExportFormat::Json, "JSON");
        ui.selectable_value(&mut export.format, ExportFormat::Csv, "CSV");
        if export.format != prev {
            logf!("UI: Export format → {:?}", export.format);
        }

        let has_rows = app.data.count(app.category()) > 0;
        if ui.add_enabled(has_rows, egui::Button::new("Export")).clicked() {
            actions::export(app);
        }
        if ui.add_enabled(has_rows, egui::Button::new("Clear tab")).clicked() {
            actions::clear(app);
        }
    });
}
