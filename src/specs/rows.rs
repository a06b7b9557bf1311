// src/specs/rows.rs
//
// Row and cell lookup. Two cascades:
// - `board()`  generic boards (test ids, class fragments, ARIA, native tables)
// - `typed()`  the classic single-category board markup
use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::core::html::{Cascade, compile};

const BOARD_ROWS: &[&str] = &[
    r#"[data-testid="board-row"]"#,
    r#"[class*="board-row"]"#,
    r#"[class*="table-row"]"#,
    r#"tr[data-id]"#,
    r#"[role="row"]"#,
    r#"[class*="row-wrapper"]"#,
    r#"tbody > tr"#,
];

const BOARD_CELLS: &[&str] = &[
    r#"[role="gridcell"]"#,
    r#"td"#,
    r#"[class*="cell"]"#,
    r#"[data-testid*="cell"]"#,
];

const TYPED_ROWS: &[&str] = &[
    r#"[data-testid="board-row"]"#,
    r#".board-row"#,
    r#"[class*="board-row"]"#,
    r#"[class*="table-row"]"#,
    r#"tr[data-id]"#,
    r#"[role="row"]"#,
];

const TYPED_CELLS: &[&str] = &[
    r#".board-cell"#,
    r#"[class*="board-cell"]"#,
    r#"[class*="table-cell"]"#,
    r#"td"#,
    r#"[role="gridcell"]"#,
    r#"[data-testid*="cell"]"#,
];

static HEADER_CELL: LazyLock<Option<Selector>> =
    LazyLock::new(|| compile(r#"[role="columnheader"], th"#));
static DATA_CELL: LazyLock<Option<Selector>> =
    LazyLock::new(|| compile(r#"[role="gridcell"], td"#));

static BOARD: LazyLock<RowLocator> = LazyLock::new(|| RowLocator::new(BOARD_ROWS, BOARD_CELLS));
static TYPED: LazyLock<RowLocator> = LazyLock::new(|| RowLocator::new(TYPED_ROWS, TYPED_CELLS));

/// Column-header rows: header cells and no data cells.
pub fn is_header_row(row: ElementRef<'_>) -> bool {
    let has = |sel: &Option<Selector>| sel.as_ref().is_some_and(|s| row.select(s).next().is_some());
    has(&*HEADER_CELL) && !has(&*DATA_CELL)
}

pub struct RowLocator {
    rows: Cascade,
    cells: Cascade,
}

impl RowLocator {
    pub fn new(rows: &[&'static str], cells: &[&'static str]) -> Self {
        Self { rows: Cascade::new(rows), cells: Cascade::new(cells) }
    }

    pub fn board() -> &'static RowLocator {
        &BOARD
    }

    pub fn typed() -> &'static RowLocator {
        &TYPED
    }

    /// Rows under `root` from the first pattern that finds any. Empty = no data.
    pub fn locate_rows<'a>(&self, root: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        self.rows.find_where(root, |row| !is_header_row(*row))
    }

    pub fn locate_cells<'a>(&self, row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        self.cells.find(row)
    }
}
