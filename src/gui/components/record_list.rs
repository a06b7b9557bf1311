// src/gui/components/record_list.rs
//
// Cards for the active tab, filtered by the search box. Purely a view; the
// delete click is forwarded to actions after the table is drawn.

use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};
use crate::{gui::{actions, app::App}, view};

const ROW_H: f32 = 58.0;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let cat = app.category();
    let cards = view::cards(&app.data, cat, &app.state.gui.search);

    if cards.is_empty() {
        let (title, hint) = view::empty_hint(cat);
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(RichText::new(title).strong());
            ui.label(RichText::new(hint).small().weak());
        });
        return;
    }

    let mut delete: Option<String> = None;

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::remainder())
        .column(Column::exact(28.0))
        .body(|body| {
            body.rows(ROW_H, cards.len(), |mut row| {
                let (id, card) = &cards[row.index()];
                row.col(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&card.title).strong());
                        for line in &card.lines {
                            ui.label(RichText::new(line).small());
                        }
                    });
                });
                row.col(|ui| {
                    if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                        delete = Some(id.clone());
                    }
                });
            });
        });

    if let Some(id) = delete {
        actions::delete(app, cat, &id);
    }
}
