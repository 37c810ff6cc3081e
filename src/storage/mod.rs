//! Persistent storage for the analysis history
//!
//! The history lives under a single key of a [`KeyValueStore`]:
//!
//! - [`FileStore`]: one JSON file per key inside a data directory, written atomically
//! - [`MemoryStore`]: process-local map with an optional size quota, used in tests
//!
//! [`HistoryStorage`] is the only component that reads or writes the history key.
//! Reads never fail (corrupt or missing data is an empty history); writes surface
//! the underlying [`StorageError`](crate::error::StorageError) unchanged.
//!
//! Data location: platform-specific data directories
//! - macOS: `~/Library/Application Support/galactic-analytics/`
//! - Linux: `~/.local/share/galactic-analytics/`
//! - Windows: `%APPDATA%\galactic-analytics\`

pub mod history;
pub mod kv;

pub use history::{HistoryStorage, STORAGE_KEY};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
