//! The state-owning controller behind every user-facing operation.
//!
//! A [`PayrollSession`] holds the one [`AppState`] value and the store it is
//! persisted through. Every mutator funnels through a single persistence
//! hook, so the store and the in-memory state cannot drift apart, and all
//! derived figures (driver stats, payroll summary, export document) are
//! recomputed in full from the state they are a pure function of.
//!
//! Imports are atomic: the file is decoded and normalized completely before
//! the record collection is replaced, so a failed or empty import leaves the
//! previous state untouched. One import runs per call; there is no
//! in-flight overlap to guard against.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::aggregate::{DriverStat, aggregate_records};
use crate::error::{PayrollError, Result};
use crate::io::{excel_write, table_read};
use crate::model::AppState;
use crate::normalize::normalize_rows;
use crate::payroll::{PayrollSummary, coerce_penalty, coerce_price, compute_summary};
use crate::report::{build_summary_sheet, default_export_file_name};
use crate::store::{KeyValueStore, StateStore};

/// Outcome of a successful import, for display by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    /// Name of the imported file, as recorded in the state.
    pub file_name: String,
    /// Number of tour records the import produced.
    pub record_count: usize,
    /// Number of distinct drivers across those records.
    pub driver_count: usize,
}

/// Controller owning the application state and its persistence.
#[derive(Debug)]
pub struct PayrollSession<S> {
    state: AppState,
    store: StateStore<S>,
}

impl<S: KeyValueStore> PayrollSession<S> {
    /// Opens a session over the given store, restoring any persisted state.
    pub fn open(store: S) -> Self {
        let store = StateStore::new(store);
        let state = store.load();
        debug!(
            records = state.records.len(),
            penalties = state.penalties.len(),
            "state restored"
        );
        Self { state, store }
    }

    /// Current application state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Imports a tour file, replacing the record collection wholesale.
    ///
    /// Decode failures and imports yielding zero records are errors that
    /// leave the previous state untouched. Penalties are not pruned by an
    /// import: entries for drivers absent from the new records stay in the
    /// map until a reset.
    #[instrument(level = "info", skip_all, fields(input = %path.display()))]
    pub fn import_file(&mut self, path: &Path) -> Result<ImportReport> {
        let rows = table_read::read_table(path)?;
        let records = normalize_rows(&rows);
        if records.is_empty() {
            return Err(PayrollError::EmptyImport);
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.state.records = records;
        self.state.source_file = Some(file_name.clone());
        self.persist()?;

        let report = ImportReport {
            record_count: self.state.records.len(),
            driver_count: self.driver_stats().len(),
            file_name,
        };
        info!(
            records = report.record_count,
            drivers = report.driver_count,
            "tour file imported"
        );
        Ok(report)
    }

    /// Sets the per-tour price from user input and returns the effective
    /// value; non-numeric input coerces to zero rather than failing.
    #[instrument(level = "info", skip(self))]
    pub fn set_tour_price(&mut self, raw: &str) -> Result<f64> {
        let price = coerce_price(raw);
        self.state.price_per_tour = price;
        self.persist()?;
        Ok(price)
    }

    /// Sets a driver's penalty from user input and returns the effective
    /// value; non-numeric or negative input coerces to zero, and the entry
    /// is written either way. The driver does not have to appear in the
    /// current records.
    #[instrument(level = "info", skip(self))]
    pub fn set_penalty(&mut self, driver: &str, raw: &str) -> Result<f64> {
        let amount = coerce_penalty(raw);
        self.state.penalties.insert(driver.to_string(), amount);
        self.persist()?;
        Ok(amount)
    }

    /// Clears records, penalties, and the source file name, removing their
    /// store entries. The tour price is configuration rather than imported
    /// data and survives the reset.
    #[instrument(level = "info", skip(self))]
    pub fn reset(&mut self) -> Result<()> {
        self.state.records.clear();
        self.state.penalties.clear();
        self.state.source_file = None;
        self.store.clear()?;
        info!("state reset");
        Ok(())
    }

    /// Per-driver stats derived from the current records.
    pub fn driver_stats(&self) -> Vec<DriverStat> {
        aggregate_records(&self.state.records)
    }

    /// Full payroll summary derived from the current state.
    pub fn summary(&self) -> PayrollSummary {
        compute_summary(
            &self.driver_stats(),
            self.state.price_per_tour,
            &self.state.penalties,
        )
    }

    /// Writes the payroll workbook and returns the path written.
    ///
    /// `output` may name a file directly or a directory that receives the
    /// default dated file name; with no output given the dated file lands
    /// in the current directory.
    #[instrument(level = "info", skip(self))]
    pub fn export(&self, output: Option<&Path>) -> Result<PathBuf> {
        let sheet = build_summary_sheet(
            &self.driver_stats(),
            self.state.price_per_tour,
            &self.state.penalties,
        );

        let path = match output {
            Some(path) if path.is_dir() => path.join(default_export_file_name()),
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(default_export_file_name()),
        };

        excel_write::write_summary(&path, &sheet)?;
        info!(output = %path.display(), rows = sheet.rows.len(), "payroll workbook written");
        Ok(path)
    }

    /// Persists the full state; invoked after every mutation.
    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.state)?;
        debug!("state saved");
        Ok(())
    }
}
