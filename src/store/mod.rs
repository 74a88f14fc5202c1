//! Persists the application state through a string key-value store.
//!
//! Four fixed keys hold the durable pieces: the record collection and the
//! penalty map as JSON blobs, the tour price as a plain decimal string, and
//! the source file name as a raw string whose key is removed, not stored
//! empty, when no file is set. Loading is forgiving: each key falls back to
//! its default independently, so one missing or corrupt entry never poisons
//! the rest.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{PayrollError, Result};
use crate::model::{AppState, DEFAULT_TOUR_PRICE, PenaltyMap, TourRecord};

/// Store key holding the imported tour records as a JSON array.
pub const KEY_RECORDS: &str = "tourpay_records";
/// Store key holding the tour price as a plain decimal string.
pub const KEY_TOUR_PRICE: &str = "tourpay_tour_price";
/// Store key holding the penalty map as a JSON object.
pub const KEY_PENALTIES: &str = "tourpay_penalties";
/// Store key holding the name of the last imported file.
pub const KEY_SOURCE_FILE: &str = "tourpay_source_file";

/// Minimal string key-value store the state is persisted through.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key` from the store. Removing an absent key is not an
    /// error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Volatile in-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Durable store backed by a single JSON object file.
///
/// The whole map is read once when the store is opened and the file is
/// rewritten on every mutation; the state blobs are small enough that
/// batching would buy nothing.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`, reading any existing entries.
    ///
    /// A missing file starts the store empty rather than failing: every
    /// state piece has a default to fall back on. Unreadable or
    /// unparseable content also starts empty, but is logged, since the
    /// first flush will overwrite whatever is there.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|error| {
                warn!(path = %path.display(), %error, "state store unparseable, starting empty");
                BTreeMap::new()
            }),
            Err(error) if error.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => {
                warn!(path = %path.display(), %error, "state store unreadable, starting empty");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    /// Opens the store at the platform default location,
    /// `<data dir>/tourpay/state.json`.
    pub fn open_default() -> Result<Self> {
        let path = dirs::data_dir()
            .ok_or(PayrollError::NoDataDir)?
            .join("tourpay")
            .join("state.json");
        Ok(Self::open(path))
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Serializes the durable state pieces to their fixed keys and back.
#[derive(Debug)]
pub struct StateStore<S> {
    store: S,
}

impl<S: KeyValueStore> StateStore<S> {
    /// Wraps the given backing store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Rebuilds the application state from the store.
    ///
    /// Each piece defaults independently (no records, the default price,
    /// no penalties, no file name) when its key is missing or unparseable.
    pub fn load(&self) -> AppState {
        let records = self
            .store
            .get(KEY_RECORDS)
            .and_then(|blob| parse_or_warn::<Vec<TourRecord>>(KEY_RECORDS, &blob))
            .unwrap_or_default();
        let price_per_tour = self
            .store
            .get(KEY_TOUR_PRICE)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|price| price.is_finite())
            .unwrap_or(DEFAULT_TOUR_PRICE);
        let penalties = self
            .store
            .get(KEY_PENALTIES)
            .and_then(|blob| parse_or_warn::<PenaltyMap>(KEY_PENALTIES, &blob))
            .unwrap_or_default();
        let source_file = self.store.get(KEY_SOURCE_FILE);

        AppState {
            records,
            price_per_tour,
            penalties,
            source_file,
        }
    }

    /// Writes the complete state back to the store, one key per piece. The
    /// source-file key is removed when no file is set.
    pub fn save(&mut self, state: &AppState) -> Result<()> {
        self.store
            .set(KEY_RECORDS, &serde_json::to_string(&state.records)?)?;
        self.store
            .set(KEY_TOUR_PRICE, &state.price_per_tour.to_string())?;
        self.store
            .set(KEY_PENALTIES, &serde_json::to_string(&state.penalties)?)?;
        match &state.source_file {
            Some(name) => self.store.set(KEY_SOURCE_FILE, name)?,
            None => self.store.remove(KEY_SOURCE_FILE)?,
        }
        Ok(())
    }

    /// Removes the reset-scoped entries: records, penalties, and the source
    /// file name. The price entry is left untouched and survives resets.
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(KEY_RECORDS)?;
        self.store.remove(KEY_PENALTIES)?;
        self.store.remove(KEY_SOURCE_FILE)?;
        Ok(())
    }

    /// Read access to the backing store.
    pub fn raw(&self) -> &S {
        &self.store
    }
}

fn parse_or_warn<T: serde::de::DeserializeOwned>(key: &str, blob: &str) -> Option<T> {
    match serde_json::from_str(blob) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(key, %error, "stored value unparseable, falling back to default");
            None
        }
    }
}
