// src/log.rs
//
// logf!/logd!/loge! front the `tracing` macros so call sites stay short.
// `init()` wires a subscriber once per process: file sink for the GUI,
// stderr for the CLI.
use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::consts::{LOG_ENV, LOG_FILE, STORE_DIR};

#[doc(hidden)]
pub use tracing;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sink {
    File,
    Stderr,
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(sink: Sink) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_target(false);

    match sink {
        Sink::Stderr => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
        Sink::File => {
            let _ = fs::create_dir_all(STORE_DIR);
            let path = std::path::Path::new(STORE_DIR).join(LOG_FILE);
            match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => {
                    let _ = builder
                        .with_ansi(false)
                        .with_writer(Mutex::new(file))
                        .try_init();
                }
                Err(_) => {
                    // Unwritable store dir: log to stderr instead.
                    let _ = builder.with_writer(std::io::stderr).try_init();
                }
            }
        }
    }
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::tracing::debug!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::tracing::error!($($arg)*)
    };
}
