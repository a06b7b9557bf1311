// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::options::{ExportFormat, ExportOptions, ExportScope},
    csv,
    error::{Error, Result},
    model::{Activity, Category, Contact, Deal, Lead, PersistedState, Timestamp},
};

/// Rendered export body for `scope` in `format`.
/// CSV of the whole state is not a table; `All` always renders JSON.
pub fn render(state: &PersistedState, scope: ExportScope, format: ExportFormat) -> Result<String> {
    let cat = match scope {
        ExportScope::All => return Ok(serde_json::to_string_pretty(state)?),
        ExportScope::One(cat) => cat,
    };
    let data = &state.data;
    match format {
        ExportFormat::Json => Ok(match cat {
            Category::Contacts => serde_json::to_string_pretty(&data.contacts)?,
            Category::Deals => serde_json::to_string_pretty(&data.deals)?,
            Category::Leads => serde_json::to_string_pretty(&data.leads)?,
            Category::Activities => serde_json::to_string_pretty(&data.activities)?,
        }),
        ExportFormat::Csv => match cat {
            Category::Contacts => csv::to_csv::<Contact>(&data.contacts),
            Category::Deals => csv::to_csv::<Deal>(&data.deals),
            Category::Leads => csv::to_csv::<Lead>(&data.leads),
            Category::Activities => csv::to_csv::<Activity>(&data.activities),
        },
    }
}

/// Write one export file. Returns the path written to.
pub fn write_export(state: &PersistedState, export: &ExportOptions, at: Timestamp) -> Result<PathBuf> {
    let format = match export.scope {
        ExportScope::All => ExportFormat::Json,
        ExportScope::One(_) => export.format,
    };
    let opts = ExportOptions { format, ..export.clone() };
    let path = opts.out_path(at);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let contents = render(state, opts.scope, format)?;
    fs::write(&path, contents)?;
    logf!("Export: {} → {}", opts.scope.name(), path.display());
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

/// `-o` handling: a directory (existing, or hinted by a trailing separator)
/// gets the generated file name; anything else is the file itself.
pub fn resolve_out(export: &mut ExportOptions, user_o: &str) {
    if user_o.is_empty() { return; }
    let p = PathBuf::from(user_o);
    if looks_like_dir_hint(&p) || p.is_dir() {
        export.out_dir = p;
        export.out_file = None;
    } else {
        export.out_file = Some(p);
    }
}
