// tests/cells.rs
//
// Cell value probing: probe priority, link hrefs, inputs, plain-text fallback.
use scraper::{Html, Selector};

use board_scrape::specs::cells::CellValueResolver;

fn resolve(inner: &str) -> String {
    let doc = Html::parse_document(&format!(r#"<div id="cell">{inner}</div>"#));
    let sel = Selector::parse("#cell").unwrap();
    let cell = doc.select(&sel).next().unwrap();
    CellValueResolver::new().resolve(Some(cell))
}

#[test]
fn status_label_wins() {
    let v = resolve(r#"<span class="status-label">Working on it</span><span>other</span>"#);
    assert_eq!(v, "Working on it");
}

#[test]
fn probe_order_beats_document_order() {
    // The date element comes first in the markup, but person is probed first.
    let v = resolve(r#"<div class="date-text">Jan 5</div><div class="person-chip">Ann Lee</div>"#);
    assert_eq!(v, "Ann Lee");
}

#[test]
fn mailto_link_without_text_yields_address() {
    let v = resolve(r#"<a href="mailto:jane@x.com"></a>"#);
    assert_eq!(v, "jane@x.com");
}

#[test]
fn empty_status_falls_through_to_tel_link() {
    let v = resolve(r#"<span class="status-label">  </span><a href="tel:+15551234567"> </a>"#);
    assert_eq!(v, "+15551234567");
}

#[test]
fn plain_link_href_is_not_a_value() {
    // Non-contact hrefs are never used; the cell has no other text.
    let v = resolve(r#"<a href="https://example.com/x"></a>"#);
    assert_eq!(v, "");
}

#[test]
fn text_input_value() {
    let v = resolve(r#"<input type="text" value="  Acme Corp  ">"#);
    assert_eq!(v, "Acme Corp");
}

#[test]
fn fallback_collapses_whitespace() {
    let v = resolve("  plain\n     text  ");
    assert_eq!(v, "plain text");
}

#[test]
fn number_cell() {
    let v = resolve(r#"<div class="number-cell">$12,500</div>"#);
    assert_eq!(v, "$12,500");
}

#[test]
fn missing_cell_is_empty() {
    assert_eq!(CellValueResolver::shared().resolve(None), "");
}

#[test]
fn non_ascii_href_without_text_is_not_a_value() {
    assert_eq!(resolve(r#"<a href="ññññ"></a>"#), "");
    assert_eq!(resolve(r#"<a href="télé"></a>"#), "");
    assert_eq!(resolve(r#"<a href="mailtö:x"></a>"#), "");
}

#[test]
fn empty_status_icon_does_not_hide_status_label() {
    let v = resolve(r#"<span class="status-icon"></span><span class="status-label">Done</span>"#);
    assert_eq!(v, "Done");

    // Every selector of a probe gets its own first match.
    let v = resolve(r#"<span class="status-label"> </span><div data-testid="status-cell">Stuck</div>"#);
    assert_eq!(v, "Stuck");
}
