// tests/rows.rs
//
// Row/cell cascades over the board layouts we meet in the wild:
// ARIA grids, class-named rows, native tables.
use scraper::Html;

use board_scrape::specs::rows::{RowLocator, is_header_row};

fn texts(els: &[scraper::ElementRef<'_>]) -> Vec<String> {
    els.iter()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .collect()
}

#[test]
fn aria_grid_skips_header_row() {
    let doc = Html::parse_document(
        r#"<div class="grid">
            <div role="row"><div role="columnheader">Name</div><div role="columnheader">Email</div></div>
            <div role="row"><div role="gridcell">A</div><div role="gridcell">a@x.com</div></div>
            <div role="row"><div role="gridcell">B</div></div>
        </div>"#,
    );
    let loc = RowLocator::board();
    let rows = loc.locate_rows(doc.root_element());
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| !is_header_row(*r)));

    assert_eq!(loc.locate_cells(rows[0]).len(), 2);
    assert_eq!(texts(&loc.locate_cells(rows[1])), vec!["B"]);
}

#[test]
fn earlier_pattern_wins() {
    let doc = Html::parse_document(
        r#"<div>
            <div data-testid="board-row"><div role="gridcell">Kept</div></div>
            <div role="row"><div role="gridcell">Ignored</div></div>
            <div role="row"><div role="gridcell">Ignored too</div></div>
        </div>"#,
    );
    let rows = RowLocator::board().locate_rows(doc.root_element());
    assert_eq!(rows.len(), 1);
    assert_eq!(texts(&rows), vec!["Kept"]);
}

#[test]
fn nested_matches_count_once() {
    let doc = Html::parse_document(
        r#"<div class="board-row-wrapper">
            <div class="board-row"><div role="gridcell">One</div></div>
        </div>
        <div class="board-row-wrapper">
            <div class="board-row"><div role="gridcell">Two</div></div>
        </div>"#,
    );
    let rows = RowLocator::board().locate_rows(doc.root_element());
    assert_eq!(rows.len(), 2);
}

#[test]
fn native_table_body_rows() {
    let doc = Html::parse_document(
        r#"<table>
            <thead><tr><th>Name</th><th>Value</th></tr></thead>
            <tbody>
                <tr><td>Acme</td><td>$1,000</td></tr>
                <tr><td>Globex</td></tr>
            </tbody>
        </table>"#,
    );
    let loc = RowLocator::board();
    let rows = loc.locate_rows(doc.root_element());
    assert_eq!(rows.len(), 2);
    assert_eq!(texts(&loc.locate_cells(rows[0])), vec!["Acme", "$1,000"]);
    assert_eq!(loc.locate_cells(rows[1]).len(), 1);
}

#[test]
fn typed_board_markup() {
    let doc = Html::parse_document(
        r#"<div class="board-row"><div class="board-cell">Jane</div><div class="board-cell">jane@x.com</div></div>
           <div class="board-row"><div class="board-cell">John</div></div>"#,
    );
    let loc = RowLocator::typed();
    let rows = loc.locate_rows(doc.root_element());
    assert_eq!(rows.len(), 2);
    assert_eq!(texts(&loc.locate_cells(rows[0])), vec!["Jane", "jane@x.com"]);
}

#[test]
fn no_rows_is_empty() {
    let doc = Html::parse_document("<p>Nothing to see</p>");
    assert!(RowLocator::board().locate_rows(doc.root_element()).is_empty());
    assert!(RowLocator::typed().locate_rows(doc.root_element()).is_empty());
}
