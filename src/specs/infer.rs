// src/specs/infer.rs
//
// Row type from its content. Label keywords decide first; otherwise the
// values' shape does. Ambiguous rows land on Contact.
use std::sync::LazyLock;

use regex::Regex;

use crate::model::RecordKind;

/// Upper-cased label fragments, checked in this order.
const LABEL_KEYWORDS: &[(RecordKind, &[&str])] = &[
    (RecordKind::Contact, &["CONTACT"]),
    (RecordKind::Deal, &["DEAL"]),
    (RecordKind::Lead, &["LEAD"]),
    (RecordKind::Activity, &["ACTIVITY", "CALL", "DEMO"]),
];

static CURRENCY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[$€£¥]").unwrap());

pub fn from_label(label: &str) -> Option<RecordKind> {
    let upper = label.to_uppercase();
    LABEL_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| upper.contains(w)))
        .map(|(kind, _)| *kind)
}

pub fn from_shape(values: &[String]) -> RecordKind {
    if values.iter().any(|v| v.contains('@')) {
        RecordKind::Contact
    } else if values.iter().any(|v| CURRENCY.is_match(v)) {
        RecordKind::Deal
    } else {
        RecordKind::Contact
    }
}

/// Deterministic: same label + values → same kind.
pub fn infer(label: &str, values: &[String]) -> RecordKind {
    from_label(label).unwrap_or_else(|| from_shape(values))
}
