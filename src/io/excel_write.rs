use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::error::Result;
use crate::report::{COLUMN_WIDTHS, CURRENCY_FORMAT, SUMMARY_COLUMNS, SUMMARY_SHEET, SummarySheet};

/// Writes the payroll summary document to the given path as a workbook with
/// a single sheet.
///
/// The header row is plain text, tour counts plain numbers, and the three
/// monetary columns carry the currency number format on every body row,
/// totals included. Column widths are advisory hints for the spreadsheet
/// application.
pub fn write_summary(path: &Path, sheet: &SummarySheet) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SUMMARY_SHEET)?;

    let currency = Format::new().set_num_format(CURRENCY_FORMAT);

    for (col_idx, header) in SUMMARY_COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, *header)?;
    }

    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        worksheet.write_string(excel_row, 0, &row.label)?;
        worksheet.write_number(excel_row, 1, row.tour_count as f64)?;
        worksheet.write_number_with_format(excel_row, 2, row.gross_pay, &currency)?;
        worksheet.write_number_with_format(excel_row, 3, row.penalty, &currency)?;
        worksheet.write_number_with_format(excel_row, 4, row.net_pay, &currency)?;
    }

    for (col_idx, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col_idx as u16, *width)?;
    }

    workbook.save(path)?;
    Ok(())
}
