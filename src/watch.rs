// src/watch.rs
//
// Wait until a selector shows up in a page that is still rendering. The page
// is re-read on every poll; the wait ends on match, timeout or cancel.
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use crate::{
    config::consts::{WAIT_POLL_MS, WAIT_TIMEOUT_MS},
    core::html::compile,
    error::{Result, WaitError},
    page::PageSnapshot,
};

/// Shared cancel flag; clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub poll: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(WAIT_TIMEOUT_MS),
            poll: Duration::from_millis(WAIT_POLL_MS),
        }
    }
}

/// Poll `load` until its page contains `selector`. Load errors count as
/// "not there yet".
pub fn wait_for<F>(
    selector: &str,
    opts: WaitOptions,
    cancel: &CancelToken,
    mut load: F,
) -> std::result::Result<PageSnapshot, WaitError>
where
    F: FnMut() -> Result<PageSnapshot>,
{
    let sel = compile(selector).ok_or_else(|| WaitError::BadSelector(s!(selector)))?;
    let started = Instant::now();

    loop {
        if cancel.is_cancelled() {
            logd!("Wait: {} cancelled", selector);
            return Err(WaitError::Cancelled { selector: s!(selector) });
        }

        match load() {
            Ok(page) => {
                if page.document().select(&sel).next().is_some() {
                    logd!("Wait: {} found after {:?}", selector, started.elapsed());
                    return Ok(page);
                }
            }
            Err(e) => logd!("Wait: load failed: {}", e),
        }

        let waited = started.elapsed();
        if waited >= opts.timeout {
            return Err(WaitError::Timeout {
                selector: s!(selector),
                waited_ms: waited.as_millis(),
            });
        }
        thread::sleep(opts.poll.min(opts.timeout - waited));
    }
}
