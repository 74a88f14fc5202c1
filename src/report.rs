//! Builds the spreadsheet-shaped export document for a payroll run.
//!
//! Construction is pure; [`crate::io::excel_write`] turns the resulting
//! [`SummarySheet`] into an actual workbook file.

use chrono::Utc;

use crate::aggregate::DriverStat;
use crate::model::PenaltyMap;
use crate::payroll::compute_summary;

/// Column headings of the summary sheet, in order.
pub const SUMMARY_COLUMNS: [&str; 5] = [
    "Driver",
    "Tour Count",
    "Gross Amount",
    "Penalties",
    "Net Payable",
];

/// Advisory column widths, in character units.
pub const COLUMN_WIDTHS: [f64; 5] = [30.0, 15.0, 15.0, 15.0, 15.0];

/// Excel number format applied to the three monetary columns.
pub const CURRENCY_FORMAT: &str = "#,##0.00\" €\"";

/// Label of the trailing totals row.
pub const TOTAL_LABEL: &str = "TOTAL";

/// Name of the single sheet in the exported workbook.
pub const SUMMARY_SHEET: &str = "Pay Summary";

/// One body row of the summary sheet: a driver line or the totals line.
///
/// The gross, penalty, and net cells carry [`CURRENCY_FORMAT`] in the
/// written workbook; the tour count is a plain number and the label a plain
/// string.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    /// Driver name, or [`TOTAL_LABEL`] on the totals row.
    pub label: String,
    /// Tour count for the driver, or the total over all drivers.
    pub tour_count: usize,
    /// Gross amount in the row's scope.
    pub gross_pay: f64,
    /// Penalty amount in the row's scope.
    pub penalty: f64,
    /// Net payable amount in the row's scope.
    pub net_pay: f64,
}

/// The structured document handed to the spreadsheet writer: driver rows in
/// aggregation order followed by the totals row. The header is fixed, see
/// [`SUMMARY_COLUMNS`].
#[derive(Debug, Clone, PartialEq)]
pub struct SummarySheet {
    /// Body rows; the totals row is always last.
    pub rows: Vec<SummaryRow>,
}

/// Builds the export document from the aggregated stats, the tour price,
/// and the penalty map.
///
/// The per-row and total figures follow [`compute_summary`], including the
/// whole-map penalty total on the final row.
pub fn build_summary_sheet(
    stats: &[DriverStat],
    price_per_tour: f64,
    penalties: &PenaltyMap,
) -> SummarySheet {
    let summary = compute_summary(stats, price_per_tour, penalties);

    let mut rows: Vec<SummaryRow> = summary
        .lines
        .iter()
        .map(|line| SummaryRow {
            label: line.driver.clone(),
            tour_count: line.tour_count,
            gross_pay: line.gross_pay,
            penalty: line.penalty,
            net_pay: line.net_pay,
        })
        .collect();

    rows.push(SummaryRow {
        label: TOTAL_LABEL.to_string(),
        tour_count: summary.totals.total_tours,
        gross_pay: summary.totals.total_gross,
        penalty: summary.totals.total_penalties,
        net_pay: summary.totals.total_payout,
    });

    SummarySheet { rows }
}

/// Default file name for an export performed now: the current UTC date in
/// ISO form embedded in a fixed prefix, e.g. `pay_summary_2024-07-01.xlsx`.
pub fn default_export_file_name() -> String {
    format!("pay_summary_{}.xlsx", Utc::now().format("%Y-%m-%d"))
}
