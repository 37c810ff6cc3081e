//! Galactic Analytics - Analyze spending CSV files and keep a history of results
//!
//! This library is the client side of the galactic spending analytics service.
//! It supports:
//!
//! - Uploading a CSV file and consuming the streamed analysis ([`ApiClient::analyze`])
//! - Turning the first streamed record into display-ready highlights
//! - Keeping a persisted, de-duplicated history of past analyses ([`HistoryStore`])
//! - Pacing bursts of UI-facing calls without dropping any ([`Scheduler`])
//! - Downloading generated sample reports
//!
//! # Example
//!
//! ```no_run
//! use galactic_analytics::{FileStore, HistoryStorage, HistoryStore};
//!
//! let mut store = HistoryStore::load(HistoryStorage::new(FileStore::new("/tmp/galactic")));
//! let item = store.add_to_history("spending.csv", None)?;
//! assert_eq!(store.history()[0].id, item.id);
//! # Ok::<(), galactic_analytics::error::StorageError>(())
//! ```

pub mod cli;
pub mod client;
pub mod error;
pub mod models;
pub mod parsers;
pub mod scheduler;
pub mod storage;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use client::{AnalysisCallbacks, AnalysisObserver, ApiClient};
pub use error::{AnalysisError, ReportError, StorageError};
pub use models::{DisplayEntry, Highlights, HistoryItem};
pub use parsers::{is_csv_file, transform_analysis_data};
pub use scheduler::{SchedulePolicy, Scheduler};
pub use storage::{FileStore, HistoryStorage, KeyValueStore, MemoryStore};
pub use store::HistoryStore;
