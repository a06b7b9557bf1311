// src/coordinator.rs
//
// Background side: owns the record store, saves extraction results, runs
// extraction against a page on request and keeps the board badge.
use serde_json::Value;

use crate::{
    error::Result,
    messages::{self, Handler, MIXED, Request, Response},
    model::Category,
    store::{KeyValueStore, MergeReport, RecordStore},
};

pub struct Coordinator<S: KeyValueStore> {
    store: RecordStore<S>,
    badge: String,
}

impl<S: KeyValueStore> Coordinator<S> {
    /// Initializes storage on start.
    pub fn new(store: RecordStore<S>) -> Result<Self> {
        store.initialize()?;
        Ok(Self { store, badge: s!() })
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    /// Current badge text; empty when no board type is known.
    pub fn badge(&self) -> &str {
        &self.badge
    }

    pub fn save(&self, board_type: &str, data: &Value) -> Result<MergeReport> {
        self.store.merge_payload(board_type, data)
    }

    fn save_response(&self, board_type: &str, data: &Value) -> Response {
        match self.save(board_type, data) {
            Ok(results) => Response::saved(results),
            Err(e) => {
                loge!("Coordinator: save failed: {}", e);
                Response { success: false, error: Some(e.to_string()), ..Response::default() }
            }
        }
    }

    /// Ask `page` to extract, then save what it returns. The page's response is
    /// passed back unchanged; a missing page turns into a user-facing message.
    pub fn trigger(&mut self, page: Option<&mut dyn Handler>) -> Response {
        let response = match messages::send(page, Request::ExtractData) {
            Ok(r) => r,
            Err(e) => {
                loge!("Coordinator: {}", e);
                return Response::fail(e.user_message());
            }
        };

        if response.success {
            let board_type = response.board_type.as_deref().unwrap_or(MIXED);
            let data = response.data.clone().unwrap_or(Value::Null);
            let saved = self.save_response(board_type, &data);
            if !saved.success {
                return saved;
            }
        }
        response
    }

    pub fn board_detected(&mut self, board_type: Option<Category>) {
        self.badge = board_type.map(Category::badge).unwrap_or_default();
        logd!("Coordinator: badge {:?}", self.badge);
    }

    /// Full dispatch; `page` is only needed for `TriggerExtraction`.
    pub fn handle_with(&mut self, request: Request, page: Option<&mut dyn Handler>) -> Response {
        match request {
            Request::SaveData { board_type, data } => self.save_response(&board_type, &data),
            Request::TriggerExtraction => self.trigger(page),
            Request::BoardDetected { board_type } => {
                self.board_detected(board_type);
                Response::ok()
            }
            Request::ExtractData => Response::fail("Unknown action"),
        }
    }
}

impl<S: KeyValueStore> Handler for Coordinator<S> {
    fn handle(&mut self, request: Request) -> Response {
        self.handle_with(request, None)
    }
}
