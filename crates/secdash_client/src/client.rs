use std::time::Duration;

use crate::types::{
    ApiError, ErrorEnvelope, FilingDto, FilingStatsDto, FilingsQuery, IngestRequest,
    IngestResponse, IngestStatusDto, TickerInfoDto,
};

/// Environment variable selecting the API base URL.
pub const BASE_URL_ENV: &str = "SECDASH_API_BASE";
/// Local development backend, used when the variable is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientSettings {
    /// Reads the base URL from `SECDASH_API_BASE`, falling back to the local
    /// development endpoint.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            ..Self::default()
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// The REST contract consumed by the dashboard. Pure request/response; the
/// polling cadence and all caching live with the caller.
#[async_trait::async_trait]
pub trait IngestApi: Send + Sync {
    async fn submit_job(&self, request: &IngestRequest) -> Result<IngestResponse, ApiError>;
    async fn fetch_status(&self, handle: &str) -> Result<IngestStatusDto, ApiError>;
    async fn list_recent_jobs(&self, limit: u32) -> Result<Vec<IngestStatusDto>, ApiError>;
    async fn list_recent_filings(&self, query: &FilingsQuery) -> Result<Vec<FilingDto>, ApiError>;
    async fn check_health(&self) -> Result<String, ApiError>;
    async fn resolve_ticker(&self, symbol: &str) -> Result<TickerInfoDto, ApiError>;
    async fn filing_stats(&self, symbol: &str) -> Result<FilingStatsDto, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestIngestApi {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestIngestApi {
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T>(&self, path: &str, params: &[(&str, String)]) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut request = self.client.get(self.endpoint(path));
        if !params.is_empty() {
            request = request.query(params);
        }
        let response = request.send().await.map_err(map_transport)?;
        read_json(check(response).await?).await
    }
}

#[async_trait::async_trait]
impl IngestApi for ReqwestIngestApi {
    async fn submit_job(&self, request: &IngestRequest) -> Result<IngestResponse, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/ingest/refresh"))
            .json(request)
            .send()
            .await
            .map_err(map_transport)?;
        read_json(check(response).await?).await
    }

    async fn fetch_status(&self, handle: &str) -> Result<IngestStatusDto, ApiError> {
        let path = format!("/ingest/status/{handle}");
        match self.get_json(&path, &[]).await {
            Err(ApiError::Server { status: 404, .. }) => Err(ApiError::NotFound(handle.to_string())),
            other => other,
        }
    }

    async fn list_recent_jobs(&self, limit: u32) -> Result<Vec<IngestStatusDto>, ApiError> {
        self.get_json("/ingest/status", &[("limit", limit.to_string())])
            .await
    }

    async fn list_recent_filings(&self, query: &FilingsQuery) -> Result<Vec<FilingDto>, ApiError> {
        self.get_json("/filings/recent", &query.to_params()).await
    }

    async fn check_health(&self) -> Result<String, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/ingest/health"))
            .send()
            .await
            .map_err(map_transport)?;
        check(response)
            .await?
            .text()
            .await
            .map_err(map_transport)
    }

    async fn resolve_ticker(&self, symbol: &str) -> Result<TickerInfoDto, ApiError> {
        self.get_json("/ticker/resolve", &[("symbol", symbol.to_string())])
            .await
    }

    async fn filing_stats(&self, symbol: &str) -> Result<FilingStatsDto, ApiError> {
        let path = format!("/filings/stats/{symbol}");
        self.get_json(&path, &[]).await
    }
}

/// Maps a non-2xx response to `ApiError::Server`, pulling the message out of
/// the error envelope when the backend sent one.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|envelope| envelope.message)
        .ok()
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| status.to_string());
    Err(ApiError::Server {
        status: status.as_u16(),
        message,
    })
}

async fn read_json<T>(response: reqwest::Response) -> Result<T, ApiError>
where
    T: serde::de::DeserializeOwned,
{
    let body = response.text().await.map_err(map_transport)?;
    serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
}

fn map_transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}
