//! Search history and favorites persistence.
//!
//! A small JSON-file store: dispatched searches append history entries,
//! starred entries live in named favorite collections. A missing or corrupt
//! file is treated as an empty store rather than an error.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// Maximum retained history entries; the oldest is evicted beyond this.
pub const HISTORY_LIMIT: usize = 50;

/// Name of the collection favorites land in by default.
pub const DEFAULT_COLLECTION: &str = "Default";

/// One dispatched search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    pub urls: Vec<String>,
    pub engines: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(query: impl Into<String>, urls: Vec<String>, engines: Vec<String>) -> Self {
        Self {
            query: query.into(),
            urls,
            engines,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    history: Vec<HistoryEntry>,
    #[serde(default)]
    favorites: BTreeMap<String, Vec<HistoryEntry>>,
}

/// JSON-file backed history/favorites store.
pub struct HistoryStore {
    path: PathBuf,
    data: StoreData,
}

impl HistoryStore {
    /// Opens the store at `path`, starting empty when the file is missing
    /// or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(data) => data,
                Err(e) => {
                    warn!("History file {} is corrupt ({}), starting empty", path.display(), e);
                    StoreData::default()
                }
            },
            Err(_) => StoreData::default(),
        };
        Self { path, data }
    }

    /// The default store location under the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("dorkhub").join("history.json"))
    }

    /// History entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.data.history
    }

    /// Appends an entry, skipping exact duplicates (same query and URLs)
    /// and evicting the oldest entry past [`HISTORY_LIMIT`].
    pub fn add(&mut self, entry: HistoryEntry) -> Result<()> {
        let duplicate = self
            .data
            .history
            .iter()
            .any(|h| h.query == entry.query && h.urls == entry.urls);
        if duplicate {
            return Ok(());
        }
        self.data.history.push(entry);
        while self.data.history.len() > HISTORY_LIMIT {
            let oldest = self
                .data
                .history
                .iter()
                .enumerate()
                .min_by_key(|(_, h)| h.timestamp)
                .map(|(i, _)| i);
            match oldest {
                Some(i) => {
                    self.data.history.remove(i);
                }
                None => break,
            }
        }
        self.save()
    }

    /// Removes all history entries (favorites are kept).
    pub fn clear(&mut self) -> Result<()> {
        self.data.history.clear();
        self.save()
    }

    /// Stars an entry into the named collection.
    pub fn favorite(&mut self, collection: &str, entry: HistoryEntry) -> Result<()> {
        self.data
            .favorites
            .entry(collection.to_string())
            .or_default()
            .push(entry);
        self.save()
    }

    /// Favorites in one collection.
    pub fn favorites(&self, collection: &str) -> &[HistoryEntry] {
        self.data
            .favorites
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Names of all favorite collections.
    pub fn collections(&self) -> Vec<&str> {
        self.data.favorites.keys().map(String::as_str).collect()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
