// tests/export_csv.rs
//
// CSV rendering of record lists and export files on disk.
use std::fs;
use std::path::PathBuf;

use board_scrape::config::options::{ExportFormat, ExportOptions, ExportScope};
use board_scrape::csv::{parse_rows, to_csv};
use board_scrape::file::{self, resolve_out, write_export};
use board_scrape::model::{BoardPartition, Category, Contact, Deal, PersistedState};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("board_scrape_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn state() -> PersistedState {
    let mut s = PersistedState::default();
    s.data = BoardPartition {
        contacts: vec![Contact {
            id: "jane doe-".into(),
            name: "Doe, Jane".into(),
            title: r#"He said "hi""#.into(),
            account: "Line1\nLine2".into(),
            ..Contact::default()
        }],
        deals: vec![
            Deal { id: "a".into(), name: "Big".into(), value: 12500.0, ..Deal::default() },
            Deal { id: "b".into(), name: "Odd".into(), value: 1234.5, ..Deal::default() },
        ],
        ..BoardPartition::default()
    };
    s.last_sync.deals = Some(1_700_000_000_000);
    s
}

#[test]
fn csv_quotes_and_round_trips() {
    let csv = to_csv(&state().data.contacts).unwrap();
    let rows = parse_rows(&csv);
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0],
        vec!["id", "name", "email", "phone", "account", "title", "owner", "extractedAt"]
    );
    assert_eq!(rows[1][1], "Doe, Jane");
    assert_eq!(rows[1][4], "Line1\nLine2");
    assert_eq!(rows[1][5], r#"He said "hi""#);
}

#[test]
fn csv_numbers() {
    let csv = to_csv(&state().data.deals).unwrap();
    let rows = parse_rows(&csv);
    assert_eq!(&rows[0][..3], &["id", "name", "value"]);
    assert_eq!(rows[1][2], "12500");
    assert_eq!(rows[2][2], "1234.5");
}

#[test]
fn csv_header_from_first_record() {
    let list = vec![
        Contact { id: "1".into(), name: "A".into(), status: Some("Done".into()), ..Contact::default() },
        Contact { id: "2".into(), name: "B".into(), ..Contact::default() },
    ];
    let rows = parse_rows(&to_csv(&list).unwrap());
    let status = rows[0].iter().position(|h| h == "status").unwrap();
    assert_eq!(rows[1][status], "Done");
    assert_eq!(rows[2][status], "");
}

#[test]
fn csv_of_nothing_is_empty() {
    assert_eq!(to_csv::<Deal>(&[]).unwrap(), "");
}

#[test]
fn export_one_category_as_csv() {
    let dir = tmp_dir("export_csv");
    let opts = ExportOptions {
        format: ExportFormat::Csv,
        scope: ExportScope::One(Category::Deals),
        out_dir: dir.clone(),
        out_file: None,
    };
    let path = write_export(&state(), &opts, 1_700_000_000_123).unwrap();
    assert_eq!(path, dir.join("board_deals_1700000000123.csv"));
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("id,name,value"));
}

#[test]
fn export_all_is_always_json() {
    let dir = tmp_dir("export_all");
    let opts = ExportOptions {
        format: ExportFormat::Csv,
        scope: ExportScope::All,
        out_dir: dir.clone(),
        out_file: None,
    };
    let path = write_export(&state(), &opts, 42).unwrap();
    assert_eq!(path, dir.join("board_all_42.json"));

    let back: PersistedState = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back, state());
}

#[test]
fn export_one_category_as_json() {
    let text = file::render(&state(), ExportScope::One(Category::Contacts), ExportFormat::Json).unwrap();
    let back: Vec<Contact> = serde_json::from_str(&text).unwrap();
    assert_eq!(back, state().data.contacts);
}

#[test]
fn out_arg_file_or_dir() {
    let dir = tmp_dir("export_out");
    let mut opts = ExportOptions::default();

    resolve_out(&mut opts, dir.to_str().unwrap());
    assert_eq!(opts.out_dir, dir);
    assert_eq!(opts.out_file, None);

    let file = dir.join("mine.json");
    resolve_out(&mut opts, file.to_str().unwrap());
    assert_eq!(opts.out_path(7), file);

    let hinted = format!("{}/", dir.join("later").display());
    resolve_out(&mut opts, &hinted);
    assert_eq!(opts.out_file, None);
    assert!(opts.out_path(7).ends_with("board_all_7.json"));
}

#[test]
fn export_into_a_file_path_is_rejected_as_dir() {
    let dir = tmp_dir("export_not_dir");
    let blocker = dir.join("blocker");
    fs::write(&blocker, "x").unwrap();

    let opts = ExportOptions {
        format: ExportFormat::Json,
        scope: ExportScope::One(Category::Deals),
        out_dir: blocker.clone(),
        out_file: None,
    };
    let err = write_export(&state(), &opts, 1).unwrap_err();
    assert!(err.to_string().contains("Not a directory"));
}

#[test]
fn reader_handles_crlf_blank_lines_and_escapes() {
    let rows = parse_rows("a,\"\",c\r\n\r\nx,\"y\"\"z\"\n");
    assert_eq!(rows, vec![vec!["a", "", "c"], vec!["x", "y\"z"]]);
}
