//! Record transformer: turns the raw analysis stream into highlights.
//!
//! The backend answers with newline-delimited JSON, of which only the first
//! record is meaningful. Everything here is pure and performs no I/O.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::AnalysisError;
use crate::models::{DisplayEntry, HighlightKey, Highlights, UNKNOWN_PARAMETER};

const CSV_EXTENSION: &str = "csv";

/// Result of transforming one analysis response
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisData {
    /// Parsed highlights with `rows_affected` removed
    pub highlights: Highlights,
    /// Display entries for the same stripped record, in server order
    pub highlights_to_store: Vec<DisplayEntry>,
}

/// Check that a file name carries a `.csv` extension (any case) and a non-empty stem
pub fn is_csv_file(path: &Path) -> bool {
    let has_stem = path.file_stem().is_some_and(|stem| !stem.is_empty());
    let has_csv_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION));

    has_stem && has_csv_extension
}

/// Accept any JSON object that shares at least one key with the recognized highlight set
pub fn validate_server_response(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.keys().any(|key| HighlightKey::from_key(key).is_some()))
}

/// Map every key of `highlights` to a display entry, preserving input order.
///
/// Unrecognized keys are kept with the [`UNKNOWN_PARAMETER`] description so the
/// output always has exactly one entry per input key.
pub fn convert_highlights_to_array(highlights: &Map<String, Value>) -> Vec<DisplayEntry> {
    highlights
        .iter()
        .map(|(key, value)| {
            let description = HighlightKey::from_key(key)
                .map(HighlightKey::description)
                .unwrap_or(UNKNOWN_PARAMETER);
            DisplayEntry { title: render_value(value), description: description.to_string() }
        })
        .collect()
}

/// Decode the first newline-terminated record of `raw` and validate it.
///
/// # Errors
///
/// - [`AnalysisError::Failed`] if the record is not UTF-8 or not valid JSON
/// - [`AnalysisError::InvalidServerResponse`] if it has none of the recognized keys
pub fn transform_analysis_data(raw: &[u8]) -> Result<AnalysisData, AnalysisError> {
    let record = first_record(raw);

    let text = std::str::from_utf8(record).map_err(|e| {
        debug!("Analysis record is not valid UTF-8: {}", e);
        AnalysisError::Failed
    })?;

    let value: Value = serde_json::from_str(text).map_err(|e| {
        debug!("Analysis record is not valid JSON: {}", e);
        AnalysisError::Failed
    })?;

    if !validate_server_response(&value) {
        return Err(AnalysisError::InvalidServerResponse);
    }

    let Value::Object(mut record) = value else {
        return Err(AnalysisError::InvalidServerResponse);
    };
    record.shift_remove(HighlightKey::RowsAffected.as_str());

    let highlights_to_store = convert_highlights_to_array(&record);
    let highlights: Highlights = serde_json::from_value(Value::Object(record)).map_err(|e| {
        debug!("Analysis record has mistyped highlight fields: {}", e);
        AnalysisError::InvalidServerResponse
    })?;

    Ok(AnalysisData { highlights, highlights_to_store })
}

/// Bytes up to, not including, the first newline (or everything if there is none)
pub(crate) fn first_record(raw: &[u8]) -> &[u8] {
    raw.iter().position(|&b| b == b'\n').map_or(raw, |end| &raw[..end])
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) => format!("{:.0}", round_half_up(f)),
            None => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Round to the nearest integer, halves towards positive infinity, never `-0`
fn round_half_up(f: f64) -> f64 {
    let floor = f.floor();
    let rounded = if f - floor >= 0.5 { floor + 1.0 } else { floor };
    if rounded == 0.0 { 0.0 } else { rounded }
}
