// src/specs/mod.rs
//! # Board reading "specs" module
//!
//! This module hosts the **page-reading rules** for CRM board pages. Each spec
//! covers one question about a rendered board and encodes *where the ground truth
//! tends to live in the markup* and *how to get at it when the markup varies*.
//!
//! ## What lives here
//! - **Cell values** (`cells`) – a prioritized probe list (status, person, date,
//!   number, editable text, link, generic container) with a raw-text fallback.
//! - **Row/cell location** (`rows`) – ordered structural selector cascades; the
//!   first pattern that matches anything wins.
//! - **Board classification** (`board_type`) – URL → title → header keywords,
//!   gated on a recognised host. Advisory only.
//! - **Row typing** (`infer`) – label keywords first, then content shape
//!   (`@` ⇒ contact, currency symbol ⇒ deal), then contact.
//! - **Record shaping** (`builder`) – label cleanup, field heuristics, stable ids.
//!
//! ## What does **not** live here
//! - **Persistence/merging** – `store` owns the stored state.
//! - **Orchestration** – `scrape::extract_board` walks the rows and assembles the
//!   partition; specs only answer local questions.
//! - **GUI/export concerns.**
//!
//! ## Typical call chain
//! ```text
//! GUI / CLI → page::PageAgent → scrape::extract_board()
//!               ↘ rows::RowLocator → cells / infer → builder
//!             coordinator → store::RecordStore::merge_payload (outside of specs)
//! ```
//!
//! ## Conventions & invariants
//! - All lookups are read-only and never fail; absence yields empty strings or
//!   empty lists and the caller decides what that means.
//! - Selector lists are compiled once (`LazyLock`) and tried in a fixed order.
//! - Keyword matching is case-insensitive.
//!
//! In short: **`specs` knows how to read the boards.** Other layers decide when to
//! extract, how to store, and how to present/export.
pub mod board_type;
pub mod builder;
pub mod cells;
pub mod infer;
pub mod rows;
