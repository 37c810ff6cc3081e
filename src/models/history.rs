use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::highlights::Highlights;

/// A past analysis as stored in the history list.
///
/// Created once when an analysis completes and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub file_name: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Highlights>,
}

/// The caller-supplied part of a history item; id and timestamp are generated
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistoryItem {
    pub file_name: String,
    pub highlights: Option<Highlights>,
}

impl HistoryItem {
    /// Create an item with a fresh id and the current time
    pub fn create(new_item: NewHistoryItem) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            file_name: new_item.file_name,
            // Persisted with millisecond precision, keep memory identical
            timestamp: Utc::now().trunc_subsecs(3),
            highlights: new_item.highlights,
        }
    }

    pub fn has_highlights(&self) -> bool {
        self.highlights.is_some()
    }
}
