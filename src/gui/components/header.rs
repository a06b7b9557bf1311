// src/gui/components/header.rs
//
// Page source fields, the Extract button and the detected board badge.

use eframe::egui::{self, RichText};
use crate::{gui::{actions, app::App}, page::IndicatorState};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.heading("CRM Board Extractor");
        if let Some(cat) = app.detected {
            let badge = RichText::new(format!(" {} ", cat.badge()))
                .strong()
                .color(egui::Color32::WHITE)
                .background_color(egui::Color32::from_rgb(0, 115, 234));
            ui.label(badge).on_hover_text(format!("Detected board: {}", cat.label()));
        }
    });

    egui::Grid::new("page_source").num_columns(2).show(ui, |ui| {
        ui.label("Page:");
        if ui
            .add(egui::TextEdit::singleline(&mut app.state.gui.page_path)
                .hint_text("saved board .html")
                .desired_width(f32::INFINITY))
            .changed()
        {
            logd!("UI: page_path → {}", app.state.gui.page_path);
        }
        ui.end_row();

        ui.label("URL:");
        ui.add(egui::TextEdit::singleline(&mut app.state.gui.page_url)
            .hint_text("https://example.monday.com/boards/…")
            .desired_width(f32::INFINITY));
        ui.end_row();
    });

    ui.horizontal(|ui| {
        let can_run = !app.running && !app.state.gui.page_path.trim().is_empty();
        if ui.add_enabled(can_run, egui::Button::new("Extract Current Board")).clicked() {
            actions::extract(app);
        }
        if app.running {
            ui.spinner();
        }
    });

    match app.indicator.state() {
        IndicatorState::Hidden => {}
        IndicatorState::Loading => { ui.label(app.indicator.title()); }
        IndicatorState::Success(_) => {
            ui.colored_label(egui::Color32::DARK_GREEN, format!("✓ {}", app.indicator.message()));
        }
        IndicatorState::Error(_) => {
            ui.colored_label(egui::Color32::DARK_RED, format!("✗ {}", app.indicator.message()));
        }
    }
    ui.add_space(2.0);
}
