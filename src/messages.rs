// src/messages.rs
//
// Request/response payloads exchanged between the page side, the coordinator
// and the frontends. Shapes match the JSON the stored blob and exports use.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    config::options::ExtractMode,
    error::ChannelError,
    model::Category,
    scrape::ExtractOutcome,
    store::MergeReport,
};

/// Board type tag for partition payloads.
pub const MIXED: &str = "mixed";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    ExtractData,
    SaveData {
        #[serde(rename = "boardType")]
        board_type: String,
        data: Value,
    },
    TriggerExtraction,
    BoardDetected {
        #[serde(rename = "boardType")]
        board_type: Option<Category>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<MergeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn ok() -> Self {
        Self { success: true, ..Self::default() }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self { success: false, message: Some(message.into()), ..Self::default() }
    }

    pub fn saved(results: MergeReport) -> Self {
        Self { success: true, results: Some(results), ..Self::default() }
    }

    /// Extraction result as sent back to the requester. Mixed boards send the
    /// whole partition; single-category boards send that category's list.
    pub fn extracted(outcome: &ExtractOutcome, mode: ExtractMode) -> Self {
        match outcome {
            ExtractOutcome::Failure { message } => Self::fail(message.clone()),
            ExtractOutcome::Success { data, count, message } => {
                let (board_type, payload) = match mode {
                    ExtractMode::Mixed => (s!(MIXED), serde_json::to_value(data)),
                    ExtractMode::Typed(cat) => (s!(cat.key()), category_value(data, cat)),
                };
                match payload {
                    Ok(payload) => Self {
                        success: true,
                        board_type: Some(board_type),
                        data: Some(payload),
                        count: Some(*count),
                        message: Some(message.clone()),
                        ..Self::default()
                    },
                    Err(e) => Self::fail(format!("Error extracting data: {e}")),
                }
            }
        }
    }

    pub fn text(&self) -> &str {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or(if self.success { "OK" } else { "Unknown error" })
    }
}

fn category_value(data: &crate::model::BoardPartition, cat: Category) -> serde_json::Result<Value> {
    match cat {
        Category::Contacts => serde_json::to_value(&data.contacts),
        Category::Deals => serde_json::to_value(&data.deals),
        Category::Leads => serde_json::to_value(&data.leads),
        Category::Activities => serde_json::to_value(&data.activities),
    }
}

/// Something that answers requests.
pub trait Handler {
    fn handle(&mut self, request: Request) -> Response;
}

/// Deliver `request` to `target`; no target is a channel failure.
pub fn send(target: Option<&mut dyn Handler>, request: Request) -> Result<Response, ChannelError> {
    match target {
        Some(h) => Ok(h.handle(request)),
        None => Err(ChannelError::NoListener),
    }
}
