// src/specs/cells.rs
//
// Best-guess value of one board cell. Probes are tried in order. Within a probe
// each selector is tried in turn against its first matching descendant, which
// yields its trimmed text, input value, or (for mailto:/tel: links) the cleaned
// href.
use std::sync::LazyLock;

use scraper::ElementRef;

use crate::core::html::{Cascade, text, trimmed_text, value_attr};
use crate::core::sanitize::{is_contact_href, strip_scheme};

type Reader = fn(ElementRef<'_>) -> Option<String>;

struct Probe {
    kind: &'static str,
    steps: Cascade,
    read: Reader,
}

/// (probe kind, selectors) in priority order.
const PROBES: &[(&str, &[&str])] = &[
    ("status", &[".status-label", r#"[class*="status"]"#, r#"[data-testid*="status"]"#]),
    (
        "person",
        &[".person-picker", r#"[class*="person"]"#, r#"[class*="people"]"#, r#"[data-testid*="person"]"#],
    ),
    (
        "date",
        &[".date-text", r#"[class*="date"]"#, r#"[data-testid*="date"]"#, r#"input[type="date"]"#],
    ),
    ("number", &[".number-cell", r#"[class*="number"]"#, r#"[data-testid*="number"]"#]),
    ("input", &[r#"input[type="text"]"#, "textarea", r#"[contenteditable="true"]"#]),
    ("link", &[r#"a[href^="mailto:"]"#, r#"a[href^="tel:"]"#, "a", r#"[class*="link"]"#]),
    (
        "generic",
        &[r#"[class*="value"]"#, r#"[class*="text"]"#, "span", r#"div[class*="cell-content"]"#],
    ),
];

fn read_plain(el: ElementRef<'_>) -> Option<String> {
    let t = trimmed_text(el);
    if !t.is_empty() {
        return Some(t);
    }
    value_attr(el)
}

fn read_link(el: ElementRef<'_>) -> Option<String> {
    read_plain(el).or_else(|| {
        el.value()
            .attr("href")
            .filter(|h| is_contact_href(h))
            .map(|h| strip_scheme(h).to_string())
            .filter(|h| !h.is_empty())
    })
}

pub struct CellValueResolver {
    probes: Vec<Probe>,
}

static SHARED: LazyLock<CellValueResolver> = LazyLock::new(CellValueResolver::new);

impl CellValueResolver {
    pub fn new() -> Self {
        let probes = PROBES
            .iter()
            .map(|&(kind, patterns)| {
                let read: Reader = if kind == "link" { read_link } else { read_plain };
                Probe { kind, steps: Cascade::new(patterns), read }
            })
            .collect();
        Self { probes }
    }

    pub fn shared() -> &'static CellValueResolver {
        &SHARED
    }

    /// Never fails; a missing cell resolves to "".
    pub fn resolve(&self, cell: Option<ElementRef<'_>>) -> String {
        let Some(cell) = cell else { return s!() };

        for probe in &self.probes {
            if let Some(found) = probe.steps.heads(cell).into_iter().find_map(probe.read) {
                logd!("Cell: {} probe → {:?}", probe.kind, found);
                return found;
            }
        }
        text(cell)
    }
}

impl Default for CellValueResolver {
    fn default() -> Self {
        Self::new()
    }
}
