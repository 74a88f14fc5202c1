use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, PayrollError>;

/// Error type covering the different failure cases that can occur when the
/// tool ingests tour data, persists its state, or emits the payroll
/// workbook.
///
/// Invalid numeric input (prices, penalties) is deliberately absent: it is
/// never an error and silently coerces to zero instead, see
/// [`crate::payroll`].
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the spreadsheet reader implementation.
    #[error("spreadsheet read error: {0}")]
    SheetRead(#[from] calamine::Error),

    /// Raised when a workbook does not contain a readable first sheet.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when a decoded file yields no usable tour rows.
    #[error(
        "no tour rows found; expected columns in order: date, warehouse, tour id, driver"
    )]
    EmptyImport,

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when no platform data directory is available for the default
    /// state store location.
    #[error("no usable data directory for the state store")]
    NoDataDir,

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
