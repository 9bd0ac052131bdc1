use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Backend failure taxonomy. The client surfaces these as-is; it performs no
/// retries and keeps no state.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response at all: network, DNS or timeout.
    #[error("transport error: {0}")]
    Transport(String),
    /// Non-2xx response, message taken from the error envelope when present.
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
    /// The backend does not know the given job handle.
    #[error("unknown job handle: {0}")]
    NotFound(String),
    /// 2xx response whose body did not match the wire shape.
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Error body the backend attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub message: String,
    pub status: u16,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WireMode {
    Latest,
    Today,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub enum WireStatus {
    #[serde(rename = "in_progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "failed")]
    Failed,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub enum WireSource {
    #[serde(rename = "daily-index")]
    DailyIndex,
    #[serde(rename = "submissions")]
    Submissions,
}

/// Body of POST `/ingest/refresh`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IngestRequest {
    pub mode: WireMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbols: Option<Vec<String>>,
}

/// Response of POST `/ingest/refresh`. `status` may already be terminal.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub log_id: String,
    pub total_processed: u64,
    pub total_inserted: u64,
    pub total_skipped: u64,
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
    pub status: WireStatus,
}

/// One job snapshot from GET `/ingest/status/{id}` or the listing endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngestStatusDto {
    pub id: String,
    pub request_timestamp: String,
    pub mode: WireMode,
    #[serde(default)]
    pub symbols: Option<Vec<String>>,
    pub total_processed: u64,
    pub total_inserted: u64,
    pub total_skipped: u64,
    #[serde(default)]
    pub completed_at: Option<String>,
    pub status: WireStatus,
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
}

/// One filing from GET `/filings/recent`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilingDto {
    pub id: i64,
    pub cik: String,
    pub accession_no: String,
    pub form: String,
    pub filed_at: String,
    #[serde(default)]
    pub period_end: Option<String>,
    pub primary_doc_url: String,
    pub source: WireSource,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TickerInfoDto {
    pub cik: String,
    pub ticker: String,
    pub name: String,
    pub exchange: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilingStatsDto {
    pub cik: String,
    pub ticker: String,
    pub total_filings: u64,
    #[serde(default)]
    pub latest_filing: Option<String>,
    pub forms: BTreeMap<String, u64>,
}

/// Query for GET `/filings/recent`. All parts are optional; an empty `forms`
/// set omits the parameter entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilingsQuery {
    pub forms: Vec<String>,
    pub days: Option<u32>,
    pub limit: Option<u32>,
}

impl FilingsQuery {
    /// Serializes to query parameters; `forms` is comma-joined.
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.forms.is_empty() {
            params.push(("forms", self.forms.join(",")));
        }
        if let Some(days) = self.days {
            params.push(("days", days.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}
