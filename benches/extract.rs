// benches/extract.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use scraper::Html;

use board_scrape::{
    config::options::{ExtractMode, ExtractOptions},
    model::Category,
    progress::NullProgress,
    scrape,
};

const ROWS: usize = 500;

/// Mixed board: rotating contacts, deals, leads and activities.
fn mixed_board() -> String {
    let mut html = String::from(r#"<html><body><div class="board">"#);
    html.push_str(r#"<div role="row"><div role="columnheader">Name</div></div>"#);
    for i in 0..ROWS {
        let row = match i % 4 {
            0 => format!(r#"<div role="gridcell">Contact: Person {i}</div><div role="gridcell">p{i}@x.com</div><div role="gridcell">555-000-{i:04}</div>"#),
            1 => format!(r#"<div role="gridcell">Deal {i}</div><div role="gridcell">${i},500</div><div role="gridcell">Proposal</div>"#),
            2 => format!(r#"<div role="gridcell">Lead: Co {i}</div><div role="gridcell">Company {i}</div><div role="gridcell">Working on it</div>"#),
            _ => format!(r#"<div role="gridcell">Call #{i}</div><div role="gridcell">Mar {}</div><div role="gridcell">Acct {i}</div>"#, i % 28 + 1),
        };
        html.push_str(&format!(r#"<div role="row">{row}</div>"#));
    }
    html.push_str("</div></body></html>");
    html
}

/// Grouped single-category deal board.
fn deals_board() -> String {
    let mut html = String::from("<html><body>");
    for g in 0..10 {
        html.push_str(&format!(r#"<div class="board-group"><div class="group-header-title">Group {g}</div>"#));
        for i in 0..ROWS / 10 {
            html.push_str(&format!(
                r#"<div class="board-row"><div class="board-cell">Deal {g}-{i}</div><div class="board-cell"><span class="number-cell">${i},000</span></div><div class="board-cell"><span class="status-label">Negotiation</span></div></div>"#
            ));
        }
        html.push_str("</div>");
    }
    html.push_str("</body></html>");
    html
}

fn bench_extract(c: &mut Criterion) {
    let mixed = Html::parse_document(&mixed_board());
    let deals = Html::parse_document(&deals_board());
    let mixed_opts = ExtractOptions::default();
    let deals_opts = ExtractOptions { mode: ExtractMode::Typed(Category::Deals), ..ExtractOptions::default() };

    c.bench_function("extract_mixed", |b| {
        b.iter(|| {
            let out = scrape::extract_board(black_box(&mixed), &mixed_opts, &mut NullProgress);
            black_box(out.data().map(|d| d.total()))
        })
    });

    c.bench_function("extract_typed_deals", |b| {
        b.iter(|| {
            let out = scrape::extract_board(black_box(&deals), &deals_opts, &mut NullProgress);
            black_box(out.data().map(|d| d.total()))
        })
    });

    c.bench_function("parse_and_extract_mixed", |b| {
        let text = mixed_board();
        b.iter(|| {
            let doc = Html::parse_document(black_box(&text));
            let out = scrape::extract_board(&doc, &mixed_opts, &mut NullProgress);
            black_box(out.data().map(|d| d.total()))
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
