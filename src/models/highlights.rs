use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parsers::analysis::convert_highlights_to_array;

/// Description used for keys the client does not recognize
pub const UNKNOWN_PARAMETER: &str = "unknown parameter";

/// A highlight field the analysis backend may report.
///
/// The declaration order is the canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKey {
    TotalSpendGalactic,
    RowsAffected,
    LessSpentAt,
    BigSpentAt,
    LessSpentValue,
    BigSpentValue,
    AverageSpendGalactic,
    BigSpentCiv,
    LessSpentCiv,
}

impl HighlightKey {
    pub const ALL: [HighlightKey; 9] = [
        HighlightKey::TotalSpendGalactic,
        HighlightKey::RowsAffected,
        HighlightKey::LessSpentAt,
        HighlightKey::BigSpentAt,
        HighlightKey::LessSpentValue,
        HighlightKey::BigSpentValue,
        HighlightKey::AverageSpendGalactic,
        HighlightKey::BigSpentCiv,
        HighlightKey::LessSpentCiv,
    ];

    /// Wire name of the key as sent by the server
    pub fn as_str(self) -> &'static str {
        match self {
            HighlightKey::TotalSpendGalactic => "total_spend_galactic",
            HighlightKey::RowsAffected => "rows_affected",
            HighlightKey::LessSpentAt => "less_spent_at",
            HighlightKey::BigSpentAt => "big_spent_at",
            HighlightKey::LessSpentValue => "less_spent_value",
            HighlightKey::BigSpentValue => "big_spent_value",
            HighlightKey::AverageSpendGalactic => "average_spend_galactic",
            HighlightKey::BigSpentCiv => "big_spent_civ",
            HighlightKey::LessSpentCiv => "less_spent_civ",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    /// Human-readable label shown next to the value
    pub fn description(self) -> &'static str {
        match self {
            HighlightKey::TotalSpendGalactic => "Total spend",
            HighlightKey::RowsAffected => "Rows processed",
            HighlightKey::LessSpentAt => "Day of min spend",
            HighlightKey::BigSpentAt => "Day of max spend",
            HighlightKey::LessSpentValue => "Min spend in a day",
            HighlightKey::BigSpentValue => "Max spend in a day",
            HighlightKey::AverageSpendGalactic => "Average spend",
            HighlightKey::BigSpentCiv => "Civilization with max spend",
            HighlightKey::LessSpentCiv => "Civilization with min spend",
        }
    }
}

/// Summary statistics for one analyzed CSV file.
///
/// The server may answer with any subset of the recognized keys, so every
/// field is optional. Absent fields are omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Highlights {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_spend_galactic: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows_affected: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_spent_at: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub big_spent_at: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_spent_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub big_spent_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_spend_galactic: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub big_spent_civ: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_spent_civ: Option<String>,
}

impl Highlights {
    /// Display entries for the fields that are present, in canonical order
    pub fn display_entries(&self) -> Vec<DisplayEntry> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => convert_highlights_to_array(&map),
            _ => Vec::new(),
        }
    }
}

/// One line of a highlights listing: the rendered value and its label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayEntry {
    pub title: String,
    pub description: String,
}
