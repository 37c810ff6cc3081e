//! Data models for CSV analysis results and the analysis history.
//!
//! This module defines the data structures used throughout the application:
//!
//! - [`Highlights`] - Summary statistics returned by the analysis backend
//! - [`HighlightKey`] - The nine recognized highlight keys in canonical order
//! - [`DisplayEntry`] - One titled line of a highlights listing
//! - [`HistoryItem`] - One persisted past analysis
//! - [`SelectionState`] - Which history item is selected and whether its modal is shown
//!
//! History items are persisted as JSON with camelCase field names and millisecond
//! timestamps, so the on-disk format stays stable across releases.

pub mod highlights;
pub mod history;
pub mod selection;

pub use highlights::{DisplayEntry, HighlightKey, Highlights, UNKNOWN_PARAMETER};
pub use history::{HistoryItem, NewHistoryItem};
pub use selection::{ModalState, SelectionState};
