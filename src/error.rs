// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::config::consts::MSG_REFRESH_PAGE;

/// Library-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("No data found. Make sure the board has visible rows with data.")]
    NoDataFound,

    #[error("Invalid data format for {board_type}: expected a list of records")]
    MalformedSavePayload { board_type: String },

    #[error("Unknown board type: {0}")]
    UnknownBoardType(String),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Wait(#[from] WaitError),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("{0}")]
    Usage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure to reach the other side of a request/response channel.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("No page is listening")]
    NoListener,
}

impl ChannelError {
    /// Text shown to the user in place of the raw error.
    pub fn user_message(&self) -> &'static str {
        match self {
            ChannelError::NoListener => MSG_REFRESH_PAGE,
        }
    }
}

/// A single row could not be turned into a record. Logged and skipped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("row {index}: no cells")]
    NoCells { index: usize },

    #[error("row {index}: empty label")]
    EmptyLabel { index: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WaitError {
    #[error("Element {selector} not found within {waited_ms}ms")]
    Timeout { selector: String, waited_ms: u128 },

    #[error("Wait for {selector} was cancelled")]
    Cancelled { selector: String },

    #[error("Invalid selector: {0}")]
    BadSelector(String),
}
