// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;
use crate::model::{Category, Timestamp};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub extract: ExtractOptions,
    pub export: ExportOptions,
}

/// How rows are turned into records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExtractMode {
    /// Infer each row's type from its content (mixed boards).
    #[default]
    Mixed,
    /// Every row is the given category; positional column mapping.
    Typed(Category),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    pub mode: ExtractMode,
    /// Hosts the board classifier accepts.
    pub hosts: Vec<String>,
    /// Merge into the store after a successful extraction.
    pub save: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            mode: ExtractMode::Mixed,
            hosts: DEFAULT_HOSTS.iter().map(|h| s!(*h)).collect(),
            save: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Json => "json", ExportFormat::Csv => "csv" }
    }

    pub fn from_name(name: &str) -> Option<ExportFormat> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            _ => None,
        }
    }
}

/// What an export covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportScope {
    One(Category),
    /// Whole persisted state (JSON only).
    #[default]
    All,
}

impl ExportScope {
    pub fn name(&self) -> &'static str {
        match self {
            ExportScope::One(cat) => cat.key(),
            ExportScope::All => EXPORT_ALL,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub scope: ExportScope,
    pub out_dir: PathBuf,
    /// Explicit file path; overrides `out_dir` + generated name.
    pub out_file: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Json,
            scope: ExportScope::All,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            out_file: None,
        }
    }
}

impl ExportOptions {
    /// `board_<scope>_<millis>.<ext>`
    pub fn file_name(&self, at: Timestamp) -> String {
        format!("{}_{}_{}.{}", EXPORT_PREFIX, self.scope.name(), at, self.format.ext())
    }

    pub fn out_path(&self, at: Timestamp) -> PathBuf {
        match &self.out_file {
            Some(p) => p.clone(),
            None => self.out_dir.join(self.file_name(at)),
        }
    }
}
