// src/gui/actions/delete.rs
use crate::{gui::app::App, model::Category};

pub fn delete(app: &mut App, cat: Category, id: &str) {
    let Some(c) = &app.coordinator else { return };
    match c.store().delete_record(cat, id) {
        Ok(true) => app.status(format!("Deleted {id}")),
        Ok(false) => logd!("Delete: {} {} already gone", cat, id),
        Err(e) => {
            loge!("Delete: {} {}: {}", cat, id, e);
            app.status(format!("Delete failed: {e}"));
        }
    }
}

pub fn clear(app: &mut App) {
    let cat = app.category();
    let Some(c) = &app.coordinator else { return };
    match c.store().clear_category(cat) {
        Ok(()) => app.status(format!("Cleared {}", cat.label())),
        Err(e) => {
            loge!("Clear: {}: {}", cat, e);
            app.status(format!("Clear failed: {e}"));
        }
    }
}
