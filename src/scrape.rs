// src/scrape.rs
//
// Board extraction: walk rows, type them, shape them, partition them.
// Row-level failures are logged and skipped; the pass itself never fails,
// it reports "no data" instead.
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::{
    config::consts::UNGROUPED,
    config::options::{ExtractMode, ExtractOptions},
    core::html::{Cascade, compile, first, text, value_attr},
    error::{Error, RowError},
    model::{AnyRecord, BoardPartition, Category, Timestamp, now_ms},
    progress::Progress,
    specs::{builder, cells::CellValueResolver, infer, rows::RowLocator},
};

const GROUPS: &[&str] = &[
    r#".board-group"#,
    r#"[class*="board-group"]"#,
    r#"[data-testid*="group"]"#,
    r#"[role="group"]"#,
];

const GROUP_TITLES: &[&str] = &[
    r#".group-header-title"#,
    r#"[class*="group-header"]"#,
    r#"[class*="group-title"]"#,
    r#"h2"#,
    r#"h3"#,
];

static GROUP: LazyLock<Cascade> = LazyLock::new(|| Cascade::new(GROUPS));
static GROUP_TITLE: LazyLock<Cascade> = LazyLock::new(|| Cascade::new(GROUP_TITLES));
static SPAN: LazyLock<Option<Selector>> = LazyLock::new(|| compile("span"));
static LINK: LazyLock<Option<Selector>> = LazyLock::new(|| compile("a"));
static INPUT: LazyLock<Option<Selector>> = LazyLock::new(|| compile("input"));

/// Result of one extraction pass.
#[derive(Clone, Debug, PartialEq)]
pub enum ExtractOutcome {
    Success {
        data: BoardPartition,
        count: usize,
        message: String,
    },
    Failure {
        message: String,
    },
}

impl ExtractOutcome {
    pub fn from_partition(data: BoardPartition) -> Self {
        if data.is_empty() {
            return ExtractOutcome::Failure { message: Error::NoDataFound.to_string() };
        }
        ExtractOutcome::Success {
            count: data.total(),
            message: data.summary(),
            data,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExtractOutcome::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            ExtractOutcome::Success { message, .. } | ExtractOutcome::Failure { message } => message,
        }
    }

    pub fn data(&self) -> Option<&BoardPartition> {
        match self {
            ExtractOutcome::Success { data, .. } => Some(data),
            ExtractOutcome::Failure { .. } => None,
        }
    }
}

/// Entry point: extract every record from a loaded board.
pub fn extract_board(doc: &Html, opts: &ExtractOptions, progress: &mut dyn Progress) -> ExtractOutcome {
    let now = now_ms();
    let root = doc.root_element();

    let data = match opts.mode {
        ExtractMode::Mixed => extract_mixed(root, now, progress),
        ExtractMode::Typed(cat) => extract_typed(root, cat, now, progress),
    };

    let outcome = ExtractOutcome::from_partition(data);
    logf!("Extract: {}", outcome.message());
    progress.log(outcome.message());
    progress.finish();
    outcome
}

/* ---------------- Mixed boards ---------------- */

fn sub_text(cell: ElementRef<'_>, sel: &Option<Selector>) -> Option<String> {
    sel.as_ref()
        .and_then(|s| first(cell, s))
        .map(text)
        .filter(|t| !t.is_empty())
}

/// Primary label: cell text, then nested link, then nested span.
pub fn label_text(cell: ElementRef<'_>) -> String {
    let t = text(cell);
    if !t.is_empty() {
        return t;
    }
    sub_text(cell, &LINK)
        .or_else(|| sub_text(cell, &SPAN))
        .unwrap_or_default()
}

/// Raw cell value: cell text, then span, then link, then input value.
pub fn raw_value(cell: ElementRef<'_>) -> String {
    let t = text(cell);
    if !t.is_empty() {
        return t;
    }
    sub_text(cell, &SPAN)
        .or_else(|| sub_text(cell, &LINK))
        .or_else(|| {
            INPUT.as_ref()
                .and_then(|s| first(cell, s))
                .and_then(value_attr)
        })
        .unwrap_or_default()
}

/// Label + values of one row. Index 0 of `values` is the label.
pub fn row_values(index: usize, row: ElementRef<'_>, locator: &RowLocator) -> Result<(String, Vec<String>), RowError> {
    let cells = locator.locate_cells(row);
    let Some(head) = cells.first() else {
        return Err(RowError::NoCells { index });
    };

    let label = label_text(*head);
    if builder::clean_label(&label).is_empty() {
        return Err(RowError::EmptyLabel { index });
    }

    let mut values = Vec::with_capacity(cells.len());
    values.push(label.clone());
    values.extend(cells[1..].iter().map(|c| raw_value(*c)));
    Ok((label, values))
}

fn mixed_row(index: usize, row: ElementRef<'_>, now: Timestamp) -> Result<AnyRecord, RowError> {
    let (label, values) = row_values(index, row, RowLocator::board())?;
    let kind = infer::infer(&label, &values);
    Ok(builder::build(kind, &label, &values, now))
}

/// Generic board: every row's type is inferred from its content.
pub fn extract_mixed(root: ElementRef<'_>, now: Timestamp, progress: &mut dyn Progress) -> BoardPartition {
    let rows = RowLocator::board().locate_rows(root);
    logd!("Extract: {} candidate rows", rows.len());
    progress.begin(rows.len());

    let mut out = BoardPartition::default();
    for (i, row) in rows.into_iter().enumerate() {
        match mixed_row(i, row, now) {
            Ok(record) => {
                if !out.push(record) {
                    logd!("Extract: row {} dropped (no label)", i);
                }
            }
            Err(e) => logd!("Extract: skipping {}", e),
        }
        progress.item_done(i);
    }
    out
}

/* ---------------- Single-category boards ---------------- */

/// Deal groups: (title, group element). Empty when the board is flat.
pub fn deal_groups(root: ElementRef<'_>) -> Vec<(String, ElementRef<'_>)> {
    GROUP.find(root)
        .into_iter()
        .map(|g| {
            let title = GROUP_TITLE.first_text(g).unwrap_or_else(|| s!(UNGROUPED));
            (title, g)
        })
        .collect()
}

/// Rows to read on a single-category board, with their deal group. Deals are
/// read group by group; the whole page is scanned when no group holds a row.
fn typed_plan<'a>(root: ElementRef<'a>, cat: Category) -> Vec<(Option<String>, ElementRef<'a>)> {
    let locator = RowLocator::typed();

    if cat == Category::Deals {
        let grouped: Vec<_> = deal_groups(root)
            .into_iter()
            .flat_map(|(title, group)| {
                logd!("Extract: group {:?}", title);
                locator
                    .locate_rows(group)
                    .into_iter()
                    .map(move |row| (Some(title.clone()), row))
            })
            .collect();
        if !grouped.is_empty() {
            return grouped;
        }
    }

    locator.locate_rows(root).into_iter().map(|row| (None, row)).collect()
}

/// Single-category board: positional columns, cells via `CellValueResolver`.
pub fn extract_typed(root: ElementRef<'_>, cat: Category, now: Timestamp, progress: &mut dyn Progress) -> BoardPartition {
    let plan = typed_plan(root, cat);
    logd!("Extract: {} candidate {} rows", plan.len(), cat.key());
    progress.begin(plan.len());

    let locator = RowLocator::typed();
    let resolver = CellValueResolver::shared();
    let mut out = BoardPartition::default();

    for (i, (group, row)) in plan.into_iter().enumerate() {
        let cells = locator.locate_cells(row);
        if cells.is_empty() {
            logd!("Extract: skipping {}", RowError::NoCells { index: i });
        } else {
            let values: Vec<String> = cells.iter().map(|c| resolver.resolve(Some(*c))).collect();
            if !out.push(builder::build_typed(cat, &values, group.as_deref(), now)) {
                logd!("Extract: row {} dropped (no label)", i);
            }
        }
        progress.item_done(i);
    }
    out
}
