use crate::model::{Cell, TourRecord};

/// Number of leading columns a row must provide to qualify as a record.
const REQUIRED_COLUMNS: usize = 4;

/// Normalizes raw table rows into tour records.
///
/// The first row is always treated as a header and discarded, even when it
/// is empty or malformed. Every later row with at least four cells yields a
/// record from columns 0–3 as (date, warehouse, tour id, driver); shorter
/// rows are skipped silently rather than reported. Cells are rendered to
/// strings per [`Cell::to_text`], and the driver name is additionally
/// trimmed of surrounding whitespace.
///
/// Output order follows input order, and normalization is pure: the same
/// rows always produce the same records.
pub fn normalize_rows(rows: &[Vec<Cell>]) -> Vec<TourRecord> {
    let mut records = Vec::new();

    for row in rows.iter().skip(1) {
        if row.len() < REQUIRED_COLUMNS {
            continue;
        }

        records.push(TourRecord {
            date: cell_text(row, 0),
            warehouse: cell_text(row, 1),
            tour_id: cell_text(row, 2),
            driver: cell_text(row, 3).trim().to_string(),
        });
    }

    records
}

fn cell_text(row: &[Cell], index: usize) -> String {
    row.get(index).map(Cell::to_text).unwrap_or_default()
}
