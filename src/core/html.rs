// src/core/html.rs
//
// Thin helpers over `scraper`: element text, compiled selector cascades,
// and the "outermost match" filter used by row/cell lookup.
use std::collections::HashSet;

use scraper::{ElementRef, Selector};

use super::sanitize::normalize_ws;

/// Compile one selector (may be a comma list). Bad patterns are logged and skipped.
pub fn compile(pattern: &str) -> Option<Selector> {
    match Selector::parse(pattern) {
        Ok(sel) => Some(sel),
        Err(e) => {
            loge!("Selector: cannot parse {:?}: {:?}", pattern, e);
            None
        }
    }
}

/// Text content, trimmed (inner whitespace kept).
pub fn trimmed_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Text content with whitespace runs collapsed.
pub fn text(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Trimmed `value` attribute (inputs), if non-empty.
pub fn value_attr(el: ElementRef<'_>) -> Option<String> {
    el.value()
        .attr("value")
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// First descendant matching `sel`.
pub fn first<'a>(scope: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    scope.select(sel).next()
}

/// Drop matches that sit inside another match of the same set.
pub fn outermost<'a>(found: impl Iterator<Item = ElementRef<'a>>) -> Vec<ElementRef<'a>> {
    let all: Vec<ElementRef<'a>> = found.collect();
    if all.len() < 2 {
        return all;
    }
    let ids: HashSet<_> = all.iter().map(|e| e.id()).collect();
    all.into_iter()
        .filter(|e| !e.ancestors().any(|a| ids.contains(&a.id())))
        .collect()
}

/// Ordered selector list; the first pattern with any (kept) match wins.
pub struct Cascade {
    steps: Vec<(&'static str, Selector)>,
}

impl Cascade {
    pub fn new(patterns: &[&'static str]) -> Self {
        let steps = patterns
            .iter()
            .filter_map(|p| compile(p).map(|sel| (*p, sel)))
            .collect();
        Self { steps }
    }

    pub fn find<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        self.find_where(scope, |_| true)
    }

    /// Like `find`, but only matches passing `keep` count toward "non-empty".
    pub fn find_where<'a, F>(&self, scope: ElementRef<'a>, keep: F) -> Vec<ElementRef<'a>>
    where
        F: Fn(&ElementRef<'a>) -> bool,
    {
        for (pattern, sel) in &self.steps {
            let found: Vec<_> = outermost(scope.select(sel))
                .into_iter()
                .filter(|e| keep(e))
                .collect();
            if !found.is_empty() {
                logd!("Cascade: {} matched {}", pattern, found.len());
                return found;
            }
        }
        Vec::new()
    }

    /// First match of every pattern, in pattern order.
    pub fn heads<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        self.steps
            .iter()
            .filter_map(|(_, sel)| scope.select(sel).next())
            .collect()
    }

    /// First non-empty collapsed text among the first match of each pattern.
    pub fn first_text(&self, scope: ElementRef<'_>) -> Option<String> {
        self.steps.iter().find_map(|(_, sel)| {
            scope
                .select(sel)
                .map(text)
                .find(|t| !t.is_empty())
        })
    }
}
