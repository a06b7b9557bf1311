// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;
pub mod model;
pub mod specs;

pub mod cli;
pub mod coordinator;
pub mod csv;
pub mod file;
pub mod gui;
pub mod icon;
pub mod messages;
pub mod page;
pub mod progress;
pub mod scrape;
pub mod store;
pub mod view;
pub mod watch;
