//! Sample report download

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use reqwest::header::CONTENT_DISPOSITION;
use serde_json::Value;
use tracing::{debug, warn};

use super::{ApiClient, DEFAULT_REPORT_NAME, REPORT_PATH, REPORT_SIZE};
use crate::error::ReportError;

impl ApiClient {
    /// Download a generated report into `dest_dir` and return the saved path.
    ///
    /// The file name comes from the `Content-Disposition` header, falling back
    /// to [`DEFAULT_REPORT_NAME`].
    ///
    /// # Errors
    ///
    /// - [`ReportError::Server`] when an unsuccessful response explains itself
    ///   with an `error` field
    /// - [`ReportError::Failed`] for every other network or server failure
    /// - [`ReportError::Io`] when the file cannot be written
    pub async fn generate_report(&self, dest_dir: &Path) -> Result<PathBuf, ReportError> {
        let url = self.endpoint(REPORT_PATH);
        debug!("Requesting report from {}", url);

        let response =
            self.http.get(&url).query(&[("size", REPORT_SIZE)]).send().await.map_err(|e| {
                warn!("Report request failed: {}", e);
                ReportError::Failed
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            let message = body.as_ref().and_then(|b| b.get("error")).and_then(Value::as_str);
            warn!("Report request returned {}", status);
            return Err(match message {
                Some(message) => ReportError::Server(message.to_string()),
                None => ReportError::Failed,
            });
        }

        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| DEFAULT_REPORT_NAME.to_string());

        let bytes = response.bytes().await.map_err(|e| {
            warn!("Failed to read report body: {}", e);
            ReportError::Failed
        })?;

        let path = dest_dir.join(file_name);
        tokio::fs::create_dir_all(dest_dir)
            .await
            .map_err(|source| ReportError::Io { path: dest_dir.to_path_buf(), source })?;
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|source| ReportError::Io { path: path.clone(), source })?;

        debug!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}

/// Extract a safe file name from a `Content-Disposition` header value.
///
/// Prefers the RFC 5987 `filename*` parameter over plain `filename`, and strips
/// any directory components so the result can be joined onto a directory.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let mut plain = None;

    for param in header.split(';') {
        let Some((name, value)) = param.split_once('=') else {
            continue;
        };
        let value = value.trim();

        match name.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                // charset'language'percent-encoded-name
                let encoded = value.splitn(3, '\'').nth(2);
                let decoded =
                    encoded.and_then(|e| percent_decode_str(e).decode_utf8().ok()).map(String::from);
                if let Some(name) = decoded.as_deref().and_then(sanitize_file_name) {
                    return Some(name);
                }
            }
            "filename" => plain = Some(value.trim_matches('"').to_string()),
            _ => {}
        }
    }

    plain.as_deref().and_then(sanitize_file_name)
}

fn sanitize_file_name(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next()?.trim();
    if base.is_empty() || base == "." || base == ".." {
        return None;
    }
    Some(base.to_string())
}
