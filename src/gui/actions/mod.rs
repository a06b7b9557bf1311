// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{extract,export,delete,clear}.

mod delete;  // src/gui/actions/delete.rs
mod export;  // src/gui/actions/export.rs
mod extract; // src/gui/actions/extract.rs

pub use delete::{clear, delete};
pub use export::export;
pub use extract::extract;
