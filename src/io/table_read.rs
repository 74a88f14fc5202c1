use std::fs;
use std::path::Path;

use calamine::{DataType, Reader, open_workbook_auto};

use crate::error::{PayrollError, Result};
use crate::model::Cell;

/// Reads a tabular file into raw rows of cells.
///
/// Dispatch is by file extension: `.xlsx` and `.xls` decode the first sheet
/// of the workbook, anything else is treated as delimited text and split
/// per [`split_delimited`]. Header skipping and column-count rules belong
/// to the normalizer; both paths hand it ragged rows, see [`fold_row`] for
/// the spreadsheet side of that contract.
pub fn read_table(path: &Path) -> Result<Vec<Vec<Cell>>> {
    if is_spreadsheet(path) {
        read_first_sheet(path)
    } else {
        let text = fs::read_to_string(path)?;
        Ok(split_delimited(&text))
    }
}

/// Splits delimited text naively: lines on `\n` (a trailing `\r` is
/// stripped), cells on `,`.
///
/// Quoting and escaping are not supported, so a quoted cell containing a
/// comma mis-splits into two cells. That is the documented contract of the
/// delimited path, not an oversight.
pub fn split_delimited(text: &str) -> Vec<Vec<Cell>> {
    text.split('\n')
        .map(|line| {
            line.strip_suffix('\r')
                .unwrap_or(line)
                .split(',')
                .map(|cell| {
                    if cell.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(cell.to_string())
                    }
                })
                .collect()
        })
        .collect()
}

fn is_spreadsheet(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("xlsx" | "xls")
    )
}

fn read_first_sheet(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let mut workbook = open_workbook_auto(path)?;

    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| PayrollError::InvalidWorkbook("workbook contains no sheets".into()))?;

    let range_result = workbook
        .worksheet_range(&first_sheet)
        .ok_or_else(|| PayrollError::InvalidWorkbook(format!("missing sheet '{first_sheet}'")))?;
    let range = range_result.map_err(PayrollError::from)?;

    Ok(range.rows().map(fold_row).collect())
}

/// Folds one sheet row into cells, dropping trailing empty cells.
///
/// Sheet ranges are rectangular: a row missing its trailing cells comes
/// back padded with empty cells to the range width, which would defeat the
/// normalizer's column-count rule. Truncating the padding restores the
/// row's ragged shape, so such a row is skipped rather than imported with
/// blank fields. Interior empty cells are kept. The delimited path differs
/// here: a trailing separator produces a real empty cell that counts
/// toward the width.
fn fold_row(row: &[DataType]) -> Vec<Cell> {
    let width = row
        .iter()
        .rposition(|cell| !matches!(cell, DataType::Empty))
        .map_or(0, |last| last + 1);
    row[..width].iter().map(fold_cell).collect()
}

fn fold_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::String(value) => Cell::Text(value.clone()),
        DataType::Float(value) => Cell::Number(*value),
        DataType::Int(value) => Cell::Number(*value as f64),
        DataType::Empty => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}
