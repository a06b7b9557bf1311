// src/csv.rs
//
// Comma-separated export of record lists, and the reader used to check it.
// Quoting: a field containing the separator, a quote or a line break is
// wrapped in quotes, inner quotes doubled.
use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

pub const SEP: char = ',';

/* ---------------- Writing ---------------- */

fn quote(field: &str) -> Cow<'_, str> {
    if field.contains([SEP, '"', '\n', '\r']) {
        Cow::Owned(join!("\"", &field.replace('"', "\"\""), "\""))
    } else {
        Cow::Borrowed(field)
    }
}

/// One encoded line, newline included.
pub fn encode_row<S: AsRef<str>>(row: &[S]) -> String {
    let mut line = row
        .iter()
        .map(|cell| quote(cell.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

/// Plain-text form of one JSON field. Integral numbers drop the `.0`.
pub fn cell_text(v: &Value) -> String {
    match v {
        Value::Null => s!(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Records → CSV. The header comes from the first record's fields (in
/// declaration order); later records are read by that header.
pub fn to_csv<T: Serialize>(records: &[T]) -> Result<String> {
    let objects: Vec<Value> = records
        .iter()
        .map(serde_json::to_value)
        .collect::<std::result::Result<_, _>>()?;

    let Some(Value::Object(first)) = objects.first() else {
        return Ok(s!());
    };
    let headers: Vec<&String> = first.keys().collect();

    let mut out = encode_row(&headers);
    for obj in &objects {
        let row: Vec<String> = headers
            .iter()
            .map(|h| obj.get(h.as_str()).map(cell_text).unwrap_or_default())
            .collect();
        out.push_str(&encode_row(&row));
    }
    Ok(out)
}

/* ---------------- Reading ---------------- */

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    /// Start of a field, or inside an unquoted one.
    Plain,
    Quoted,
    /// Just saw a quote while quoted: either an escape or the closing quote.
    QuoteInQuoted,
}

/// Split CSV text into rows of fields. CRLF and LF both end a row; blank
/// lines are skipped.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = s!();
    let mut state = State::Plain;

    let mut end_row = |row: &mut Vec<String>, field: &mut String| {
        row.push(std::mem::take(field));
        if row.len() > 1 || !row[0].is_empty() {
            rows.push(std::mem::take(row));
        } else {
            row.clear();
        }
    };

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        state = match (state, ch) {
            (State::Quoted, '"') => State::QuoteInQuoted,
            (State::Quoted, c) => {
                field.push(c);
                State::Quoted
            }
            (State::QuoteInQuoted, '"') => {
                field.push('"');
                State::Quoted
            }
            (_, '"') if field.is_empty() => State::Quoted,
            (_, c) if c == SEP => {
                row.push(std::mem::take(&mut field));
                State::Plain
            }
            (_, '\r') if chars.peek() == Some(&'\n') => State::Plain,
            (_, '\n' | '\r') => {
                end_row(&mut row, &mut field);
                State::Plain
            }
            (_, c) => {
                field.push(c);
                State::Plain
            }
        };
    }

    if !field.is_empty() || !row.is_empty() {
        end_row(&mut row, &mut field);
    }
    rows
}
