//! HTTP client for the analysis backend
//!
//! - [`ApiClient::analyze`] uploads a CSV file and consumes the streamed result
//! - [`ApiClient::generate_report`] downloads a generated sample report
//!
//! The client never retries and sets no request timeout: a stalled server stalls
//! the pending call until the connection is dropped.

pub mod analysis;
pub mod report;

use anyhow::{Context, Result};
use reqwest::Client;

pub use analysis::{AnalysisCallbacks, AnalysisObserver};
pub use report::filename_from_content_disposition;

use crate::utils::AppConfig;

/// Path of the streaming analysis endpoint
pub const ANALYSIS_PATH: &str = "aggregate";
/// Row budget the server is asked to analyze
pub const ANALYSIS_ROWS: u32 = 10_000;
/// Path of the report generation endpoint
pub const REPORT_PATH: &str = "report";
/// Relative size of the generated report
pub const REPORT_SIZE: &str = "0.01";
/// File name used when the server does not suggest one
pub const DEFAULT_REPORT_NAME: &str = "report.csv";

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    api_host: String,
}

impl ApiClient {
    pub fn new(api_host: &str) -> Result<Self> {
        let http = Client::builder().build().context("Failed to build HTTP client")?;
        Ok(Self { http, api_host: api_host.trim_end_matches('/').to_string() })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.api_host())
    }

    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_host, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_host_and_path() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();

        assert_eq!(client.api_host(), "http://localhost:3000");
        assert_eq!(client.endpoint(ANALYSIS_PATH), "http://localhost:3000/aggregate");
    }
}
