//! Parsers for the analysis backend's response stream
//!
//! # Error Handling Strategy
//!
//! Unlike a log file, an analysis response carries exactly one meaningful record,
//! so there is nothing to skip and continue past:
//!
//! - **Malformed input**: Non-UTF-8 bytes or invalid JSON in the first record are
//!   logged at debug level and reported as [`AnalysisError::Failed`](crate::error::AnalysisError).
//!
//! - **Schema mismatch**: A well-formed record without any recognized highlight key
//!   is reported as `AnalysisError::InvalidServerResponse`, so callers can tell bad
//!   data apart from connectivity problems.

pub mod analysis;

pub use analysis::{
    AnalysisData, convert_highlights_to_array, is_csv_file, transform_analysis_data,
    validate_server_response,
};
