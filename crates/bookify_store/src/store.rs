//! File-backed JSON store
//!
//! This module provides the [`JsonStore`], a read-modify-write wrapper
//! around the single data document. It also implements the
//! [`TokenStore`] trait so the calendar service can load and refresh
//! OAuth tokens without knowing where they live.

use crate::document::{AppointmentRecord, DataDocument};
use crate::error::StoreError;
use bookify_common::services::{StoredTokens, TokenStore};
use bookify_config::AppConfig;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// Path used when the storage section is absent from the configuration.
pub const DEFAULT_DATA_FILE: &str = "./bookify_data.json";

/// JSON document store for Bookify
///
/// The document is held in memory behind an `RwLock`; every mutation is
/// flushed to disk before the lock is released. Writes go to a sibling
/// temp file first and are moved into place with a rename, so a crash
/// mid-write never leaves a truncated document behind.
#[derive(Debug)]
pub struct JsonStore {
    /// Location of the data file
    path: PathBuf,
    /// The in-memory document
    doc: RwLock<DataDocument>,
}

impl JsonStore {
    /// Open the store at `path`, creating an empty in-memory document when
    /// the file does not exist yet. The file itself is only created on the
    /// first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let doc = if path.exists() {
            debug!("Loading data file from {}", path.display());
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            debug!(
                "Data file {} not found, starting with an empty document",
                path.display()
            );
            DataDocument::default()
        };
        info!(
            "Store ready: {} client override(s), {} token set(s), {} appointment(s)",
            doc.clients.len(),
            doc.google_tokens.len(),
            doc.appointments.len()
        );
        Ok(Self {
            path,
            doc: RwLock::new(doc),
        })
    }

    /// Open the store at the configured `storage.data_file`, falling back
    /// to [`DEFAULT_DATA_FILE`] when the section is absent.
    pub fn from_config(config: &Arc<AppConfig>) -> Result<Self, StoreError> {
        let path = config
            .storage
            .as_ref()
            .map(|s| s.data_file.as_str())
            .unwrap_or(DEFAULT_DATA_FILE);
        Self::open(path)
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Widget overrides for a bot, if any were configured.
    pub fn client_overrides(&self, bot_id: &str) -> Result<Option<Value>, StoreError> {
        let doc = self.read()?;
        Ok(doc.clients.get(bot_id).cloned())
    }

    /// Append a booked appointment and flush.
    pub fn append_appointment(&self, record: AppointmentRecord) -> Result<(), StoreError> {
        let mut doc = self.write()?;
        doc.appointments.push(record);
        self.persist(&doc)
    }

    /// All booked appointments, oldest first.
    pub fn appointments(&self) -> Result<Vec<AppointmentRecord>, StoreError> {
        let doc = self.read()?;
        Ok(doc.appointments.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, DataDocument>, StoreError> {
        self.doc.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, DataDocument>, StoreError> {
        self.doc.write().map_err(|_| StoreError::Poisoned)
    }

    /// Serialize the document to a temp file, then rename it into place.
    /// Pretty-printed so the file stays hand-editable.
    fn persist(&self, doc: &DataDocument) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(doc)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!("Data file written to {}", self.path.display());
        Ok(())
    }
}

impl TokenStore for JsonStore {
    type Error = StoreError;

    fn load(&self, client_id: &str) -> Result<Option<StoredTokens>, StoreError> {
        let doc = self.read()?;
        Ok(doc.google_tokens.get(client_id).cloned())
    }

    fn save(&self, client_id: &str, tokens: &StoredTokens) -> Result<(), StoreError> {
        let mut doc = self.write()?;
        doc.google_tokens
            .insert(client_id.to_string(), tokens.clone());
        self.persist(&doc)
    }

    fn clear(&self, client_id: &str) -> Result<bool, StoreError> {
        let mut doc = self.write()?;
        let removed = doc.google_tokens.remove(client_id).is_some();
        if removed {
            self.persist(&doc)?;
        }
        Ok(removed)
    }
}
