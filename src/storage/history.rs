//! History persistence on top of a key-value store

use std::collections::HashSet;

use tracing::warn;

use super::kv::KeyValueStore;
use crate::error::StorageError;
use crate::models::{HistoryItem, NewHistoryItem};

/// Key holding the JSON-encoded history list
pub const STORAGE_KEY: &str = "tableHistory";

/// Serializes the history list to and from a single storage key
#[derive(Debug, Clone)]
pub struct HistoryStorage<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> HistoryStorage<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the persisted history, newest first.
    ///
    /// A missing key, unreadable storage or malformed content all yield an
    /// empty list. Items repeating an earlier id are dropped.
    pub fn get_history(&self) -> Vec<HistoryItem> {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read history, treating it as empty: {}", e);
                return Vec::new();
            }
        };

        let items: Vec<HistoryItem> = match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!("Stored history is corrupted, treating it as empty: {}", e);
                return Vec::new();
            }
        };

        let mut seen = HashSet::with_capacity(items.len());
        let total = items.len();
        let unique: Vec<HistoryItem> =
            items.into_iter().filter(|item| seen.insert(item.id.clone())).collect();
        if unique.len() < total {
            warn!("Dropped {} history items with duplicate ids", total - unique.len());
        }

        unique
    }

    /// Prepend a new item with a generated id and timestamp and persist the list
    pub fn add_to_history(&self, new_item: NewHistoryItem) -> Result<HistoryItem, StorageError> {
        let item = HistoryItem::create(new_item);

        let mut history = self.get_history();
        history.insert(0, item.clone());
        self.write(&history)?;

        Ok(item)
    }

    /// Persist the history without the item `id`; a missing id still rewrites the list
    pub fn remove_from_history(&self, id: &str) -> Result<(), StorageError> {
        let mut history = self.get_history();
        history.retain(|item| item.id != id);
        self.write(&history)
    }

    /// Erase the history key
    pub fn clear_history(&self) -> Result<(), StorageError> {
        self.store.remove_item(&self.key)
    }

    /// Persist `history` as given, replacing whatever is stored
    pub fn save_history(&self, history: &[HistoryItem]) -> Result<(), StorageError> {
        self.write(history)
    }

    fn write(&self, history: &[HistoryItem]) -> Result<(), StorageError> {
        let json = serde_json::to_string(history)?;
        self.store.set_item(&self.key, &json)
    }
}
