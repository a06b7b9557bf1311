// src/progress.rs
/// Lightweight progress reporting used by long-running operations (extract/export).
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one logical unit completes (e.g., a board row was read).
    fn item_done(&mut self, _index: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Collects status lines; handy for the CLI's verbose mode and for tests.
#[derive(Debug, Default)]
pub struct LineProgress {
    pub lines: Vec<String>,
    pub total: usize,
    pub done: usize,
}

impl Progress for LineProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        self.lines.push(s!(msg));
    }
    fn item_done(&mut self, _index: usize) {
        self.done += 1;
    }
}
