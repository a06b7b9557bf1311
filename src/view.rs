// src/view.rs
//
// Presentation helpers shared by the GUI and the CLI listing: search
// filtering, record cards, currency and sync-time formatting.
use chrono::{Local, TimeZone};
use serde::Serialize;
use serde_json::Value;

use crate::csv::cell_text;
use crate::model::{Activity, Category, Contact, Deal, Lead, PersistedState, Record, Timestamp};

/// Case-insensitive substring match over every field value.
/// An empty term matches everything.
pub fn matches_search<R: Serialize>(record: &R, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => map
            .values()
            .any(|v| cell_text(v).to_lowercase().contains(&term)),
        _ => false,
    }
}

pub fn filter<'a, R: Serialize>(records: &'a [R], term: &str) -> Vec<&'a R> {
    records.iter().filter(|r| matches_search(*r, term)).collect()
}

/// `12500.0` → `$12,500.00`
pub fn format_currency(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let cents = (value.abs() * 100.0).round() as u128;
    let (whole, frac) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

/// Local time, or `Never`.
pub fn format_sync(at: Option<Timestamp>) -> String {
    match at.and_then(|ms| Local.timestamp_millis_opt(ms).single()) {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => s!("Never"),
    }
}

/// Empty-list hint for one tab.
pub fn empty_hint(cat: Category) -> (String, &'static str) {
    (
        format!("No {} data yet", cat.key()),
        "Click \"Extract Current Board\" while on a board page",
    )
}

/// Heading plus two detail lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub lines: [String; 2],
}

fn pair(a: &str, b: &str) -> String {
    format!("{a} • {b}")
}

pub trait CardView {
    fn card(&self) -> Card;
}

impl CardView for Contact {
    fn card(&self) -> Card {
        Card {
            title: self.name.clone(),
            lines: [self.email.clone(), pair(&self.account, &self.title)],
        }
    }
}

impl CardView for Deal {
    fn card(&self) -> Card {
        Card {
            title: self.name.clone(),
            lines: [pair(&format_currency(self.value), &self.stage), self.group.clone()],
        }
    }
}

impl CardView for Lead {
    fn card(&self) -> Card {
        Card {
            title: self.name.clone(),
            lines: [self.company.clone(), pair(&self.status, &self.email)],
        }
    }
}

impl CardView for Activity {
    fn card(&self) -> Card {
        Card {
            title: self.kind.clone(),
            lines: [self.subject.clone(), self.date.clone()],
        }
    }
}

/// `(id, card)` for the records of `cat` that match `search`.
pub fn cards(state: &PersistedState, cat: Category, search: &str) -> Vec<(String, Card)> {
    fn of<R: Record + CardView>(records: &[R], search: &str) -> Vec<(String, Card)> {
        filter(records, search)
            .into_iter()
            .map(|r| (s!(r.id()), r.card()))
            .collect()
    }
    let data = &state.data;
    match cat {
        Category::Contacts => of(&data.contacts, search),
        Category::Deals => of(&data.deals, search),
        Category::Leads => of(&data.leads, search),
        Category::Activities => of(&data.activities, search),
    }
}
