// src/config/state.rs
use super::options::AppOptions;
use crate::model::Category;

#[derive(Clone, Debug)]
pub struct GuiState {
    pub window_w: u32,
    pub window_h: u32,

    /// Active record tab
    pub category: Category,

    /// Live search box contents
    pub search: String,

    /// Board snapshot the Extract button reads
    pub page_path: String,
    pub page_url: String,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            window_w: 480,
            window_h: 640,
            category: Category::Contacts,
            search: s!(),
            page_path: s!(),
            page_url: s!(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
