// src/gui/components/footer.rs

use eframe::egui::{self, RichText};
use crate::{gui::app::App, view};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        let cat = app.category();
        ui.label(RichText::new(format!(
            "Last sync: {}",
            view::format_sync(app.data.last_sync.get(cat))
        )).small());
        ui.separator();
        ui.label(RichText::new(app.status_text()).small());
    });
}
