use std::fs;

use calamine::{Reader, open_workbook_auto};
use chrono::NaiveDate;
use tempfile::tempdir;
use tourpay::io::table_read::read_table;
use tourpay::model::Cell;
use tourpay::report::{SUMMARY_COLUMNS, SUMMARY_SHEET, default_export_file_name};
use tourpay::session::PayrollSession;
use tourpay::store::MemoryStore;

fn session_with_tours() -> PayrollSession<MemoryStore> {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("tours.csv");
    fs::write(
        &input,
        "date,warehouse,tour,driver\n\
         2024-07-01,North,T1,Alice\n\
         2024-07-02,South,T2,Alice\n\
         2024-07-02,South,T3,Bob\n",
    )
    .expect("input written");

    let mut session = PayrollSession::open(MemoryStore::new());
    session.import_file(&input).expect("import succeeded");
    session.set_penalty("Alice", "25.5").expect("penalty set");
    session.set_penalty("Ghost", "10").expect("penalty set");
    session
}

#[test]
fn exported_workbook_reads_back_row_for_row() {
    let session = session_with_tours();
    let temp_dir = tempdir().expect("temporary directory");
    let target = temp_dir.path().join("summary.xlsx");

    let written = session.export(Some(target.as_path())).expect("export succeeded");
    assert_eq!(written, target);

    let rows = read_table(&written).expect("workbook read");
    assert_eq!(rows.len(), 4);

    let header: Vec<Cell> = SUMMARY_COLUMNS
        .iter()
        .map(|name| Cell::Text(name.to_string()))
        .collect();
    assert_eq!(rows[0], header);

    assert_eq!(
        rows[1],
        [
            Cell::Text("Alice".to_string()),
            Cell::Number(2.0),
            Cell::Number(160.0),
            Cell::Number(25.5),
            Cell::Number(134.5),
        ]
    );
    assert_eq!(
        rows[2],
        [
            Cell::Text("Bob".to_string()),
            Cell::Number(1.0),
            Cell::Number(80.0),
            Cell::Number(0.0),
            Cell::Number(80.0),
        ]
    );
    assert_eq!(
        rows[3],
        [
            Cell::Text("TOTAL".to_string()),
            Cell::Number(3.0),
            Cell::Number(240.0),
            Cell::Number(35.5),
            Cell::Number(204.5),
        ]
    );
}

#[test]
fn exported_workbook_carries_the_expected_sheet_name() {
    let session = session_with_tours();
    let temp_dir = tempdir().expect("temporary directory");
    let target = temp_dir.path().join("summary.xlsx");
    session.export(Some(target.as_path())).expect("export succeeded");

    let workbook = open_workbook_auto(&target).expect("workbook opened");
    assert_eq!(workbook.sheet_names().to_vec(), [SUMMARY_SHEET]);
}

#[test]
fn exporting_without_tours_still_totals_the_penalty_map() {
    let mut session = PayrollSession::open(MemoryStore::new());
    session.set_penalty("Alice", "25.5").expect("penalty set");
    session.set_penalty("Ghost", "10").expect("penalty set");

    let temp_dir = tempdir().expect("temporary directory");
    let target = temp_dir.path().join("summary.xlsx");
    session.export(Some(target.as_path())).expect("export succeeded");

    let rows = read_table(&target).expect("workbook read");
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[1],
        [
            Cell::Text("TOTAL".to_string()),
            Cell::Number(0.0),
            Cell::Number(0.0),
            Cell::Number(35.5),
            Cell::Number(-35.5),
        ]
    );
}

#[test]
fn exporting_into_a_directory_uses_the_dated_file_name() {
    let session = session_with_tours();
    let temp_dir = tempdir().expect("temporary directory");

    let written = session
        .export(Some(temp_dir.path()))
        .expect("export succeeded");

    assert_eq!(written.parent(), Some(temp_dir.path()));
    let file_name = written
        .file_name()
        .and_then(|name| name.to_str())
        .expect("file name");
    assert!(file_name.starts_with("pay_summary_"));
    assert!(file_name.ends_with(".xlsx"));
    assert!(written.is_file());
}

#[test]
fn default_export_name_embeds_the_current_date() {
    let name = default_export_file_name();

    let date_part = name
        .strip_prefix("pay_summary_")
        .and_then(|rest| rest.strip_suffix(".xlsx"))
        .expect("dated file name shape");
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").expect("date parses");
}
