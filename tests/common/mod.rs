//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::convert::Infallible;
use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::{RawQuery, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use futures::stream::{self, Stream, StreamExt};
use parking_lot::Mutex;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// How the fake backend answers `POST /aggregate`
#[derive(Clone)]
pub enum AggregateReply {
    /// Stream the chunks, then end the body
    Chunks(Vec<&'static [u8]>),
    /// Stream the chunks, then keep the body open without sending more
    ChunksThenStall(Vec<&'static [u8]>),
    /// Stream the chunks, then fail the body so the connection is cut
    ChunksThenError(Vec<&'static [u8]>),
    /// Answer with a bare status code
    Status(StatusCode),
}

/// How the fake backend answers `GET /report`
#[derive(Clone)]
pub enum ReportReply {
    File { body: &'static str, disposition: Option<&'static str> },
    Error { status: StatusCode, body: &'static str },
}

/// Requests seen by the fake backend
#[derive(Debug, Default, Clone)]
pub struct Recorded {
    pub aggregate_calls: usize,
    pub aggregate_query: Option<String>,
    pub aggregate_body: Vec<u8>,
    pub report_calls: usize,
    pub report_query: Option<String>,
}

struct BackendState {
    aggregate: AggregateReply,
    report: ReportReply,
    recorded: Mutex<Recorded>,
}

/// In-process stand-in for the analysis backend
pub struct FakeBackend {
    addr: SocketAddr,
    state: Arc<BackendState>,
    server: JoinHandle<()>,
}

impl FakeBackend {
    /// Start a backend that answers analysis requests with `aggregate`
    pub async fn start(aggregate: AggregateReply) -> Self {
        Self::start_with(aggregate, ReportReply::File { body: "id,value\n1,100\n", disposition: None })
            .await
    }

    /// Start a backend that answers report requests with `report`
    pub async fn with_report(report: ReportReply) -> Self {
        Self::start_with(AggregateReply::Status(StatusCode::NOT_FOUND), report).await
    }

    pub async fn start_with(aggregate: AggregateReply, report: ReportReply) -> Self {
        let state =
            Arc::new(BackendState { aggregate, report, recorded: Mutex::new(Recorded::default()) });

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("Failed to read fake backend address");

        let app = Router::new()
            .route("/aggregate", post(aggregate_handler))
            .route("/report", get(report_handler))
            .with_state(Arc::clone(&state));

        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake backend failed");
        });

        Self { addr, state, server }
    }

    /// Base URL to use as the API host
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn recorded(&self) -> Recorded {
        self.state.recorded.lock().clone()
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn chunk_stream(
    chunks: Vec<&'static [u8]>,
) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
    stream::iter(chunks.into_iter().map(|chunk| Ok(Bytes::from_static(chunk))))
}

async fn aggregate_handler(
    State(state): State<Arc<BackendState>>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    {
        let mut recorded = state.recorded.lock();
        recorded.aggregate_calls += 1;
        recorded.aggregate_query = query;
        recorded.aggregate_body = body.to_vec();
    }

    match &state.aggregate {
        AggregateReply::Chunks(chunks) => Body::from_stream(chunk_stream(chunks.clone())).into_response(),
        AggregateReply::ChunksThenStall(chunks) => {
            Body::from_stream(chunk_stream(chunks.clone()).chain(stream::pending())).into_response()
        }
        AggregateReply::ChunksThenError(chunks) => {
            let chunks =
                chunks.clone().into_iter().map(|chunk| Ok::<_, io::Error>(Bytes::from_static(chunk)));
            let failure = std::iter::once(Err(io::Error::other("connection dropped")));
            Body::from_stream(stream::iter(chunks.chain(failure))).into_response()
        }
        AggregateReply::Status(status) => (*status, "error").into_response(),
    }
}

async fn report_handler(State(state): State<Arc<BackendState>>, RawQuery(query): RawQuery) -> Response {
    {
        let mut recorded = state.recorded.lock();
        recorded.report_calls += 1;
        recorded.report_query = query;
    }

    match &state.report {
        ReportReply::File { body, disposition } => {
            let mut response = (StatusCode::OK, [(header::CONTENT_TYPE, "text/csv")], *body).into_response();
            if let Some(disposition) = disposition {
                response
                    .headers_mut()
                    .insert(header::CONTENT_DISPOSITION, HeaderValue::from_static(*disposition));
            }
            response
        }
        ReportReply::Error { status, body } => {
            (*status, [(header::CONTENT_TYPE, "application/json")], *body).into_response()
        }
    }
}

/// An address nothing listens on, for connection-refused scenarios
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe port");
    let addr = listener.local_addr().expect("Failed to read probe address");
    drop(listener);
    format!("http://{}", addr)
}

/// Builder for a data directory holding the persisted history
pub struct DataDirBuilder {
    temp_dir: TempDir,
}

impl DataDirBuilder {
    /// Create a new builder with an empty data directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the data directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write raw content to the history file
    pub fn with_raw_history(self, content: &str) -> Self {
        let history_path = self.temp_dir.path().join("tableHistory.json");
        fs::write(history_path, content).expect("Failed to write history file");
        self
    }

    /// Write history items programmatically
    pub fn with_history_items(self, items: &[HistoryItemBuilder]) -> Self {
        let content = items.iter().map(|i| i.to_json()).collect::<Vec<_>>().join(",");
        self.with_raw_history(&format!("[{}]", content))
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for DataDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for persisted history items
pub struct HistoryItemBuilder {
    id: String,
    file_name: String,
    timestamp: i64,
    total_spend: Option<f64>,
}

impl HistoryItemBuilder {
    /// Create a new history item with default values
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            file_name: "data.csv".to_string(),
            timestamp: 1751155200000,
            total_spend: None,
        }
    }

    /// Set the file name
    pub fn file_name(mut self, file_name: &str) -> Self {
        self.file_name = file_name.to_string();
        self
    }

    /// Set the timestamp in milliseconds
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Attach highlights with the given total spend
    pub fn total_spend(mut self, total: f64) -> Self {
        self.total_spend = Some(total);
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        let highlights_field = self
            .total_spend
            .map(|t| format!(r#","highlights":{{"total_spend_galactic":{},"big_spent_civ":"monsters"}}"#, t))
            .unwrap_or_default();

        format!(
            r#"{{"id":"{}","fileName":"{}","timestamp":{}{}}}"#,
            self.id, self.file_name, self.timestamp, highlights_field
        )
    }
}

/// Write a small CSV file for upload tests
pub fn write_csv(dir: &Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, "civ,developer_id,date,spend\nhumans,1,1,100\nmonsters,2,365,500\n")
        .expect("Failed to write CSV file");
    path
}
