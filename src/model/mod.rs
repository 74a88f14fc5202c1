use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Price applied to every tour until the user overrides it.
pub const DEFAULT_TOUR_PRICE: f64 = 80.0;

/// Mapping from driver name to a non-negative penalty amount.
///
/// Entries live independently of the tour data: a penalty keyed by a driver
/// who no longer appears in the imported records survives re-imports and is
/// only dropped by a reset.
pub type PenaltyMap = BTreeMap<String, f64>;

/// A single raw input cell as produced by the table decoders.
///
/// Spreadsheet and delimited-text sources are folded into this common shape
/// before normalization; richer source values (booleans, error codes) are
/// rendered into `Text` by the decoder, so downstream code only ever sees
/// these three cases.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Plain text cell.
    Text(String),
    /// Numeric cell.
    Number(f64),
    /// Missing or blank cell.
    Empty,
}

impl Cell {
    /// Renders the cell as a string.
    ///
    /// `Text` passes through unchanged, numbers use the plain `f64`
    /// rendering (`80.0` becomes `"80"`, `80.5` becomes `"80.5"`), and empty
    /// cells become `""`.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Text(value) => value.clone(),
            Cell::Number(value) => value.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// One qualifying input row: a single tour assignment.
///
/// Records are immutable once created; an import replaces the whole
/// collection rather than merging into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourRecord {
    /// Tour date as it appeared in the source; opaque, never validated.
    pub date: String,
    /// Warehouse the tour departs from; opaque.
    pub warehouse: String,
    /// Tour identifier; opaque.
    pub tour_id: String,
    /// Driver name, trimmed of surrounding whitespace by the normalizer.
    pub driver: String,
}

/// The complete persisted unit: everything the tool remembers between runs.
///
/// Mutated by imports, price edits, penalty edits, and resets; the owning
/// session re-serializes it to the store after every mutation. All payroll
/// figures are derived from this value on demand and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Imported tour records, replaced wholesale by each import.
    pub records: Vec<TourRecord>,
    /// Price credited per tour, uniform across drivers.
    pub price_per_tour: f64,
    /// Driver name to penalty amount.
    pub penalties: PenaltyMap,
    /// Name of the last successfully imported file.
    pub source_file: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            price_per_tour: DEFAULT_TOUR_PRICE,
            penalties: PenaltyMap::new(),
            source_file: None,
        }
    }
}
