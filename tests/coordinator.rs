// tests/coordinator.rs
//
// Request/response flow between page agent, coordinator and store:
// trigger → extract → save, board detection badge, failure paths.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use serde_json::json;

use board_scrape::config::options::{ExtractMode, ExtractOptions};
use board_scrape::coordinator::Coordinator;
use board_scrape::messages::{Handler, Request, Response};
use board_scrape::model::Category;
use board_scrape::page::{Indicator, IndicatorState, PageAgent, PageSnapshot};
use board_scrape::store::{MemoryStore, RecordStore};

const BOARD: &str = r#"<html><head><title>Q3 Pipeline</title></head><body>
<div role="row"><div role="gridcell">Contact: Jane Doe</div><div role="gridcell">jane@x.com</div></div>
<div role="row"><div role="gridcell">Acme Renewal</div><div role="gridcell">$12,500</div></div>
</body></html>"#;

fn coordinator() -> Coordinator<MemoryStore> {
    Coordinator::new(RecordStore::new(MemoryStore::new())).unwrap()
}

fn agent(html: &str, mode: ExtractMode) -> PageAgent {
    let page = PageSnapshot::new("https://acme.monday.com/boards/7", "", html);
    PageAgent::new(page, ExtractOptions { mode, ..ExtractOptions::default() })
}

#[test]
fn request_wire_shape() {
    let r: Request = serde_json::from_value(json!({
        "action": "saveData",
        "boardType": "contacts",
        "data": [],
    }))
    .unwrap();
    assert_eq!(r, Request::SaveData { board_type: "contacts".into(), data: json!([]) });

    assert_eq!(serde_json::to_value(Request::ExtractData).unwrap(), json!({ "action": "extractData" }));
    assert_eq!(
        serde_json::to_value(Request::BoardDetected { board_type: Some(Category::Deals) }).unwrap(),
        json!({ "action": "boardDetected", "boardType": "deals" })
    );
}

#[test]
fn trigger_without_page_asks_for_refresh() {
    let mut c = coordinator();
    let r = c.trigger(None);
    assert!(!r.success);
    assert_eq!(r.text(), "Please refresh the page and try again");
    assert_eq!(c.store().load().unwrap().total(), 0);
}

#[test]
fn trigger_extracts_and_saves_mixed() {
    let mut c = coordinator();
    let mut page = agent(BOARD, ExtractMode::Mixed);

    let r = c.trigger(Some(&mut page as &mut dyn Handler));
    assert!(r.success, "{r:?}");
    assert_eq!(r.board_type.as_deref(), Some("mixed"));
    assert_eq!(r.count, Some(2));
    assert_eq!(r.text(), "Extracted 2 records (1 contacts, 1 deals, 0 leads, 0 activities)");

    let state = c.store().load().unwrap();
    assert_eq!(state.count(Category::Contacts), 1);
    assert_eq!(state.count(Category::Deals), 1);
    assert_eq!(state.data.deals[0].value, 12500.0);
    // Mixed payloads stamp the categories they carry.
    assert!(state.last_sync.leads.is_some());

    assert_eq!(*page.indicator.state(), IndicatorState::Success(r.text().to_string()));
}

#[test]
fn repeated_trigger_does_not_duplicate() {
    let mut c = coordinator();
    let mut page = agent(BOARD, ExtractMode::Mixed);
    c.trigger(Some(&mut page as &mut dyn Handler));
    c.trigger(Some(&mut page as &mut dyn Handler));
    assert_eq!(c.store().load().unwrap().total(), 2);
}

#[test]
fn typed_page_sends_one_category() {
    let html = r#"<div class="board-row"><div class="board-cell">Jane</div><div class="board-cell">jane@x.com</div></div>"#;
    let mut c = coordinator();
    let mut page = agent(html, ExtractMode::Typed(Category::Contacts));

    let r = c.trigger(Some(&mut page as &mut dyn Handler));
    assert!(r.success);
    assert_eq!(r.board_type.as_deref(), Some("contacts"));
    assert!(r.data.as_ref().is_some_and(|d| d.is_array()));

    let state = c.store().load().unwrap();
    assert_eq!(state.data.contacts[0].email, "jane@x.com");
    assert!(state.last_sync.contacts.is_some());
    assert_eq!(state.last_sync.deals, None);
}

#[test]
fn empty_page_writes_nothing() {
    let mut c = coordinator();
    let writes = Arc::new(AtomicUsize::new(0));
    let _sub = {
        let writes = writes.clone();
        c.store().subscribe(move |_| {
            writes.fetch_add(1, Ordering::SeqCst);
        })
    };

    let mut page = agent("<html><body><p>Nothing</p></body></html>", ExtractMode::Mixed);
    let r = c.trigger(Some(&mut page as &mut dyn Handler));
    assert!(!r.success);
    assert!(r.text().starts_with("No data found"));
    assert_eq!(writes.load(Ordering::SeqCst), 0);
    assert_eq!(c.store().load().unwrap().last_sync, Default::default());
    assert!(matches!(page.indicator.state(), IndicatorState::Error(_)));
}

#[test]
fn board_detection_sets_badge() {
    let mut c = coordinator();
    let page = PageAgent::new(
        PageSnapshot::new("https://acme.monday.com/boards/7/deals", "", BOARD),
        ExtractOptions::default(),
    );
    assert!(c.handle(page.announce()).success);
    assert_eq!(c.badge(), "D");

    c.handle(Request::BoardDetected { board_type: None });
    assert_eq!(c.badge(), "");
}

#[test]
fn save_request_errors_are_reported() {
    let mut c = coordinator();
    let r = c.handle(Request::SaveData { board_type: "deals".into(), data: json!({ "not": "a list" }) });
    assert!(!r.success);
    assert!(r.error.as_deref().is_some_and(|e| e.contains("Invalid data format")));

    let r = c.handle(Request::SaveData {
        board_type: "leads".into(),
        data: json!([{ "id": "l1", "name": "Globex" }]),
    });
    assert!(r.success);
    let results = r.results.unwrap();
    assert_eq!(results[&Category::Leads].total, 1);
}

#[test]
fn page_answers_only_extract() {
    let mut page = agent(BOARD, ExtractMode::Mixed);
    let r = page.handle(Request::TriggerExtraction);
    assert_eq!(r, Response::fail("Unknown action"));
}

#[test]
fn snapshot_title_from_document() {
    let page = PageSnapshot::new("https://x", "", BOARD);
    assert_eq!(page.title, "Q3 Pipeline");
    let page = PageSnapshot::new("https://x", "Given", BOARD);
    assert_eq!(page.title, "Given");
}

#[test]
fn indicator_hides_itself() {
    let mut ind = Indicator::default();
    ind.show(IndicatorState::Loading);
    ind.tick(Instant::now() + Duration::from_secs(60));
    assert_eq!(*ind.state(), IndicatorState::Loading);
    assert_eq!(ind.title(), "Extracting data...");

    ind.show(IndicatorState::Success("ok".into()));
    assert_eq!(ind.auto_hide_after(), Some(Duration::from_millis(3_000)));
    ind.tick(Instant::now() + Duration::from_millis(3_500));
    assert_eq!(*ind.state(), IndicatorState::Hidden);

    ind.show(IndicatorState::Error("bad".into()));
    assert_eq!(ind.message(), "bad");
    ind.tick(Instant::now() + Duration::from_millis(4_000));
    assert!(matches!(ind.state(), IndicatorState::Error(_)));
}
