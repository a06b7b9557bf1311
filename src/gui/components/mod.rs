// src/gui/components/mod.rs
pub mod footer;
pub mod header;
pub mod record_list;
pub mod tabs;
pub mod toolbar;
