// src/gui/progress.rs
use std::sync::{Arc, Mutex};

use crate::progress::Progress;

/// Rows between status-bar refreshes on large boards.
const STEP: usize = 25;

/// Mirrors extraction progress into the shared status line.
pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    rows_read: usize,
    rows_total: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>) -> Self {
        Self { status, rows_read: 0, rows_total: 0 }
    }

    fn show(&self, line: String) {
        if let Ok(mut slot) = self.status.lock() {
            *slot = line;
        }
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.rows_total = total;
        self.rows_read = 0;
        self.show(format!("Board has {total} rows"));
    }

    fn log(&mut self, msg: &str) {
        self.show(s!(msg));
    }

    fn item_done(&mut self, _index: usize) {
        self.rows_read += 1;
        if self.rows_read % STEP == 0 || self.rows_read == self.rows_total {
            self.show(format!("Read {}/{} rows", self.rows_read, self.rows_total));
        }
    }

    fn finish(&mut self) {
        logd!("GUI: extract saw {}/{} rows", self.rows_read, self.rows_total);
    }
}
