// src/specs/builder.rs
//
// Shape a row into a typed record.
//
// `values[0]` is always the primary label cell. Content searches ("first value
// that looks like X") scan every cell, label included; positional fallbacks
// index the same list, so `values[1]` is the first cell after the label.
use std::sync::LazyLock;

use regex::Regex;

use crate::config::consts::{DEFAULT_ACTIVITY_TYPE, UNGROUPED};
use crate::model::{
    Activity, AnyRecord, Category, Contact, Deal, Lead, Record, RecordKind, Timestamp,
};

/// Stripped in this order, each at most once.
const LABEL_PREFIXES: &[&str] = &["contact:", "deal:", "lead:", "activity:", "call:"];

const STATUS_WORDS: &[&str] = &["working", "done", "stuck", "not started"];
const STAGE_WORDS: &[&str] = &["working", "done", "stuck", "not started", "negotiation", "proposal"];
const ACTIVITY_WORDS: &[&str] = &["call", "email", "meeting", "demo", "presentation"];

static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\d\s\-()]{10,}").unwrap());
static DATE_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec|^\d{1,2}$").unwrap()
});
static LEADING_FLOAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(\d+(\.\d*)?|\.\d+)").unwrap());

/// "Contact: Jane Doe" → "Jane Doe"
pub fn clean_label(label: &str) -> String {
    let mut rest = label.trim();
    for prefix in LABEL_PREFIXES {
        let n = prefix.len();
        if rest.len() >= n && rest.is_char_boundary(n) && rest[..n].eq_ignore_ascii_case(prefix) {
            rest = rest[n..].trim_start();
        }
    }
    rest.trim().to_string()
}

/// Currency text → amount. Keeps digits, `.` and `-`, then reads the leading
/// number. Anything unparseable, negative, or non-finite is 0.
pub fn parse_amount(text: &str) -> f64 {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let value = LEADING_FLOAT
        .find(&kept)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0);
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

fn has_word(v: &str, words: &[&str]) -> bool {
    let lower = v.to_lowercase();
    words.iter().any(|w| lower.contains(w))
}

/// Row values, label cell first.
struct Cells<'a> {
    all: &'a [String],
}

impl Cells<'_> {
    fn at(&self, i: usize) -> String {
        self.all.get(i).cloned().unwrap_or_default()
    }

    fn find(&self, pred: impl Fn(&str) -> bool) -> Option<String> {
        self.all.iter().find(|v| pred(v)).cloned()
    }

    fn email(&self) -> Option<String> {
        self.find(|v| v.contains('@'))
    }

    fn phone(&self) -> Option<String> {
        self.find(|v| PHONE.is_match(v))
    }

    fn status(&self) -> Option<String> {
        self.find(|v| has_word(v, STATUS_WORDS))
    }

    fn date(&self) -> Option<String> {
        self.find(|v| DATE_LIKE.is_match(v))
    }
}

/// Build one record of `kind` from a row. The id is derived from content.
pub fn build(kind: RecordKind, label: &str, values: &[String], now: Timestamp) -> AnyRecord {
    let name = clean_label(label);
    let cells = Cells { all: values };

    let mut record = match kind {
        RecordKind::Contact => AnyRecord::Contact(Contact {
            email: cells.email().unwrap_or_else(|| cells.at(1)),
            phone: cells.phone().unwrap_or_else(|| cells.at(2)),
            account: cells.at(3),
            title: cells.at(4),
            owner: cells.at(5),
            status: Some(cells.status().unwrap_or_default()),
            name,
            extracted_at: now,
            ..Default::default()
        }),
        RecordKind::Deal => AnyRecord::Deal(Deal {
            value: cells
                .find(|v| v.chars().any(|c| c.is_ascii_digit()))
                .map(|v| parse_amount(&v))
                .unwrap_or(0.0),
            stage: cells
                .find(|v| has_word(v, STAGE_WORDS))
                .unwrap_or_else(|| cells.at(2)),
            probability: cells.find(|v| v.contains('%')).unwrap_or_default(),
            close_date: cells.date().unwrap_or_default(),
            owner: cells.at(5),
            contact: cells.at(6),
            group: s!(UNGROUPED),
            name,
            extracted_at: now,
            ..Default::default()
        }),
        RecordKind::Lead => AnyRecord::Lead(Lead {
            company: cells
                .find(|v| v.chars().count() > 2 && !v.contains('@') && v != name)
                .unwrap_or_else(|| cells.at(1)),
            status: cells.status().unwrap_or_default(),
            email: cells.email().unwrap_or_default(),
            phone: cells.phone().unwrap_or_default(),
            owner: cells.at(5),
            name,
            extracted_at: now,
            ..Default::default()
        }),
        RecordKind::Activity => {
            let date = cells.date().unwrap_or_else(|| cells.at(2));
            AnyRecord::Activity(Activity {
                kind: cells
                    .find(|v| has_word(v, ACTIVITY_WORDS))
                    .unwrap_or_else(|| s!(DEFAULT_ACTIVITY_TYPE)),
                linked_to: cells
                    .find(|v| v.chars().count() > 2 && v != name && v != date)
                    .unwrap_or_default(),
                status: Some(cells.status().unwrap_or_default()),
                subject: name,
                date,
                extracted_at: now,
                ..Default::default()
            })
        }
    };
    assign_id(&mut record);
    record
}

/// Positional mapping for single-category boards: every cell has a fixed column.
/// `group` only applies to deals.
pub fn build_typed(cat: Category, cells: &[String], group: Option<&str>, now: Timestamp) -> AnyRecord {
    let at = |i: usize| cells.get(i).cloned().unwrap_or_default();

    let mut record = match cat {
        Category::Contacts => AnyRecord::Contact(Contact {
            name: at(0),
            email: at(1),
            phone: at(2),
            account: at(3),
            title: at(4),
            owner: at(5),
            extracted_at: now,
            ..Default::default()
        }),
        Category::Deals => AnyRecord::Deal(Deal {
            name: at(0),
            value: parse_amount(&at(1)),
            stage: at(2),
            probability: at(3),
            close_date: at(4),
            owner: at(5),
            contact: at(6),
            group: s!(group.unwrap_or(UNGROUPED)),
            extracted_at: now,
            ..Default::default()
        }),
        Category::Leads => AnyRecord::Lead(Lead {
            name: at(0),
            company: at(1),
            status: at(2),
            email: at(3),
            phone: at(4),
            owner: at(5),
            extracted_at: now,
            ..Default::default()
        }),
        Category::Activities => AnyRecord::Activity(Activity {
            kind: at(0),
            subject: at(1),
            date: at(2),
            linked_to: at(3),
            extracted_at: now,
            ..Default::default()
        }),
    };
    assign_id(&mut record);
    record
}

fn assign_id(record: &mut AnyRecord) {
    match record {
        AnyRecord::Contact(r) => r.assign_id(),
        AnyRecord::Deal(r) => r.assign_id(),
        AnyRecord::Lead(r) => r.assign_id(),
        AnyRecord::Activity(r) => r.assign_id(),
    }
}
