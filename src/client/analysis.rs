//! Streaming analysis consumer.
//!
//! One call to [`ApiClient::analyze`] performs exactly one POST, reads the response
//! body only until the first newline, and reports the outcome through an
//! [`AnalysisObserver`]. Failures never escape as a `Result`; they are always
//! delivered through [`AnalysisObserver::on_error`].

use std::path::Path;

use reqwest::Response;
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use super::{ANALYSIS_PATH, ANALYSIS_ROWS, ApiClient};
use crate::error::AnalysisError;
use crate::models::{DisplayEntry, Highlights};
use crate::parsers::{AnalysisData, transform_analysis_data};

const CSV_MIME: &str = "text/csv";
const FILE_FIELD: &str = "file";

/// Receives the outcome of one analysis.
///
/// Either `on_entries`, `on_data` and `on_complete` in that order, or `on_error`
/// alone, is called.
pub trait AnalysisObserver {
    /// Display entries for the received record, in the order the server sent its keys.
    /// Unrecognized keys are included with the `unknown parameter` description.
    fn on_entries(&mut self, _entries: &[DisplayEntry]) {}

    fn on_data(&mut self, highlights: Highlights);
    fn on_error(&mut self, error: AnalysisError);
    fn on_complete(&mut self);
}

/// Adapts three closures to [`AnalysisObserver`]
pub struct AnalysisCallbacks<D, E, C> {
    on_data: D,
    on_error: E,
    on_complete: C,
}

impl<D, E, C> AnalysisCallbacks<D, E, C>
where
    D: FnMut(Highlights),
    E: FnMut(AnalysisError),
    C: FnMut(),
{
    pub fn new(on_data: D, on_error: E, on_complete: C) -> Self {
        Self { on_data, on_error, on_complete }
    }
}

impl<D, E, C> AnalysisObserver for AnalysisCallbacks<D, E, C>
where
    D: FnMut(Highlights),
    E: FnMut(AnalysisError),
    C: FnMut(),
{
    fn on_data(&mut self, highlights: Highlights) {
        (self.on_data)(highlights)
    }

    fn on_error(&mut self, error: AnalysisError) {
        (self.on_error)(error)
    }

    fn on_complete(&mut self) {
        (self.on_complete)()
    }
}

impl ApiClient {
    /// Upload `file` for analysis and report the first streamed record.
    ///
    /// The caller is expected to have checked the file with
    /// [`is_csv_file`](crate::parsers::is_csv_file).
    pub async fn analyze<O: AnalysisObserver + ?Sized>(&self, file: &Path, observer: &mut O) {
        match self.fetch_analysis(file).await {
            Ok(data) => {
                observer.on_entries(&data.highlights_to_store);
                observer.on_data(data.highlights);
                observer.on_complete();
            }
            Err(e) => observer.on_error(e),
        }
    }

    async fn fetch_analysis(&self, file: &Path) -> Result<AnalysisData, AnalysisError> {
        let form = build_form(file).await?;
        let url = self.endpoint(ANALYSIS_PATH);
        debug!("Submitting {} to {}", file.display(), url);

        let response = self
            .http
            .post(&url)
            .query(&[("rows", ANALYSIS_ROWS)])
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("Analysis request failed: {}", e);
                AnalysisError::Failed
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Analysis request returned {}", status);
            return Err(AnalysisError::Failed);
        }

        let raw = read_first_record(response).await?;
        transform_analysis_data(&raw)
    }
}

async fn build_form(file: &Path) -> Result<Form, AnalysisError> {
    let bytes = tokio::fs::read(file).await.map_err(|e| {
        warn!("Failed to read {}: {}", file.display(), e);
        AnalysisError::Failed
    })?;
    let file_name =
        file.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();

    let part = Part::bytes(bytes).file_name(file_name).mime_str(CSV_MIME).map_err(|e| {
        warn!("Failed to build upload part: {}", e);
        AnalysisError::Failed
    })?;
    Ok(Form::new().part(FILE_FIELD, part))
}

/// Drain body chunks until the first newline arrives or the body ends
async fn read_first_record(mut response: Response) -> Result<Vec<u8>, AnalysisError> {
    let mut buffer = Vec::new();

    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                let scanned = buffer.len();
                buffer.extend_from_slice(&chunk);
                if buffer[scanned..].contains(&b'\n') {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read analysis stream: {}", e);
                return Err(AnalysisError::Failed);
            }
        }
    }

    if buffer.is_empty() {
        warn!("Analysis response has no body");
        return Err(AnalysisError::Failed);
    }

    debug!("Read {} bytes of analysis stream", buffer.len());
    Ok(buffer)
}
