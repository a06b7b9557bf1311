// src/gui/actions/export.rs
use crate::{
    config::options::{ExportOptions, ExportScope},
    file,
    gui::app::App,
    model::now_ms,
};

pub fn export(app: &mut App) {
    let cat = app.category();
    let opts = ExportOptions {
        scope: ExportScope::One(cat),
        ..app.state.options.export.clone()
    };

    match file::write_export(&app.data, &opts, now_ms()) {
        Ok(path) => {
            logf!("Export: {} ({:?}) → {}", cat, opts.format, path.display());
            app.status(format!("Exported to {}", path.display()));
        }
        Err(e) => {
            loge!("Export: failed {}: {}", cat, e);
            app.status(format!("Export failed: {e}"));
        }
    }
}
