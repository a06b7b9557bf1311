// tests/view.rs
//
// Review-view helpers: search, cards, currency and sync-time formatting.
use board_scrape::model::{Activity, BoardPartition, Category, Contact, Deal, PersistedState};
use board_scrape::view::{cards, empty_hint, filter, format_currency, format_sync, matches_search};

fn state() -> PersistedState {
    PersistedState {
        data: BoardPartition {
            contacts: vec![
                Contact { id: "c1".into(), name: "Jane Doe".into(), email: "jane@acme.com".into(), account: "Acme".into(), title: "CEO".into(), ..Contact::default() },
                Contact { id: "c2".into(), name: "John Roe".into(), email: "john@globex.com".into(), ..Contact::default() },
            ],
            deals: vec![Deal {
                id: "d1".into(),
                name: "Acme Renewal".into(),
                value: 12500.0,
                stage: "Proposal".into(),
                group: "Q1".into(),
                ..Deal::default()
            }],
            activities: vec![Activity {
                id: "a1".into(),
                kind: "Call".into(),
                subject: "Follow up".into(),
                date: "Mar 3".into(),
                ..Activity::default()
            }],
            ..BoardPartition::default()
        },
        ..PersistedState::default()
    }
}

#[test]
fn currency() {
    assert_eq!(format_currency(12500.0), "$12,500.00");
    assert_eq!(format_currency(0.0), "$0.00");
    assert_eq!(format_currency(999.999), "$1,000.00");
    assert_eq!(format_currency(1234567.891), "$1,234,567.89");
    assert_eq!(format_currency(-5.0), "-$5.00");
    assert_eq!(format_currency(f64::NAN), "$0.00");
}

#[test]
fn sync_time() {
    assert_eq!(format_sync(None), "Never");
    let shown = format_sync(Some(1_700_000_000_000));
    assert_eq!(shown.len(), "2023-11-14 22:13:20".len());
    assert!(shown.starts_with("2023-11-1"));
}

#[test]
fn search_is_case_insensitive_over_all_fields() {
    let s = state();
    let jane = &s.data.contacts[0];
    assert!(matches_search(jane, "ACME"));
    assert!(matches_search(jane, "ceo"));
    assert!(matches_search(jane, "  "));
    assert!(!matches_search(jane, "globex"));

    // Numbers are searchable in their displayed form.
    assert!(matches_search(&s.data.deals[0], "12500"));

    assert_eq!(filter(&s.data.contacts, "globex").len(), 1);
    assert_eq!(filter(&s.data.contacts, "").len(), 2);
}

#[test]
fn cards_per_category() {
    let s = state();

    let list = cards(&s, Category::Deals, "");
    assert_eq!(list.len(), 1);
    let (id, card) = &list[0];
    assert_eq!(id, "d1");
    assert_eq!(card.title, "Acme Renewal");
    assert_eq!(card.lines[0], "$12,500.00 • Proposal");
    assert_eq!(card.lines[1], "Q1");

    let list = cards(&s, Category::Contacts, "roe");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].1.lines[0], "john@globex.com");

    let list = cards(&s, Category::Activities, "");
    assert_eq!(list[0].1.title, "Call");
    assert_eq!(list[0].1.lines, ["Follow up".to_string(), "Mar 3".to_string()]);

    assert!(cards(&s, Category::Leads, "").is_empty());
}

#[test]
fn empty_tab_hint() {
    let (title, hint) = empty_hint(Category::Leads);
    assert_eq!(title, "No leads data yet");
    assert!(hint.contains("Extract Current Board"));
}
