// tests/board_type.rs
//
// Board classification: host gate, then URL → title → header precedence.
use scraper::Html;

use board_scrape::config::options::ExtractOptions;
use board_scrape::model::Category;
use board_scrape::specs::board_type::BoardTypeClassifier;

fn classifier() -> BoardTypeClassifier {
    BoardTypeClassifier::new(&ExtractOptions::default().hosts)
}

fn empty() -> Html {
    Html::parse_document("<html><body></body></html>")
}

#[test]
fn url_keyword() {
    let c = classifier();
    assert_eq!(
        c.classify("https://acme.monday.com/boards/1/contacts", "", &empty()),
        Some(Category::Contacts)
    );
    assert_eq!(
        c.classify("https://monday.com/leads/42", "", &empty()),
        Some(Category::Leads)
    );
}

#[test]
fn url_beats_title() {
    let c = classifier();
    assert_eq!(
        c.classify("https://acme.monday.com/deals", "Contacts overview", &empty()),
        Some(Category::Deals)
    );
}

#[test]
fn title_when_url_is_neutral() {
    let c = classifier();
    assert_eq!(
        c.classify("https://acme.monday.com/boards/123", "Sales pipeline", &empty()),
        Some(Category::Deals)
    );
    assert_eq!(
        c.classify("https://acme.monday.com/boards/123", "Team Activities", &empty()),
        Some(Category::Activities)
    );
}

#[test]
fn header_text_last() {
    let c = classifier();
    let doc = Html::parse_document("<html><body><h1>Lead Tracker</h1></body></html>");
    assert_eq!(
        c.classify("https://acme.monday.com/boards/123", "Workspace", &doc),
        Some(Category::Leads)
    );
}

#[test]
fn on_host_without_keywords() {
    let c = classifier();
    let doc = Html::parse_document("<html><body><h1>Roadmap</h1></body></html>");
    assert_eq!(c.classify("https://acme.monday.com/boards/123", "Roadmap", &doc), None);
}

#[test]
fn other_hosts_are_ignored() {
    let c = classifier();
    assert!(!c.is_recognized("https://example.com/contacts"));
    assert!(!c.is_recognized("https://monday.com.evil.io/contacts"));
    assert!(!c.is_recognized("not a url"));
    assert_eq!(c.classify("https://example.com/contacts", "Contacts", &empty()), None);
}

#[test]
fn custom_hosts() {
    let c = BoardTypeClassifier::new(&["crm.local".to_string()]);
    assert!(c.is_recognized("http://crm.local/deals"));
    assert!(c.is_recognized("http://eu.crm.local/deals"));
    assert!(!c.is_recognized("https://acme.monday.com/deals"));
}
