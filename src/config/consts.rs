// src/config/consts.rs

// Boards we recognise for classification
pub const DEFAULT_HOSTS: &[&str] = &["monday.com"];

// Local store
pub const STORE_DIR: &str = ".store";
pub const STORE_FILE: &str = "storage.json";
pub const STORAGE_KEY: &str = "board_data";

// Logging
pub const LOG_FILE: &str = "debug.log";
pub const LOG_ENV: &str = "BOARD_SCRAPE_LOG";

// Extraction
pub const UNGROUPED: &str = "Ungrouped";
pub const DEFAULT_ACTIVITY_TYPE: &str = "Activity";
pub const WAIT_TIMEOUT_MS: u64 = 5_000;
pub const WAIT_POLL_MS: u64 = 100;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const EXPORT_PREFIX: &str = "board";
pub const EXPORT_ALL: &str = "all";

// Messages
pub const MSG_REFRESH_PAGE: &str = "Please refresh the page and try again";
pub const MSG_NO_PAGE: &str = "No board page loaded";

// Indicator lifetimes
pub const INDICATOR_SUCCESS_MS: u64 = 3_000;
pub const INDICATOR_ERROR_MS: u64 = 5_000;
