//! Secdash client: typed REST contract to the ingestion backend.
mod client;
mod handle;
mod types;

pub use client::{ClientSettings, IngestApi, ReqwestIngestApi, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use handle::{ClientCommand, ClientEvent, ClientHandle, TickerReport};
pub use types::{
    ApiError, ErrorEnvelope, FilingDto, FilingStatsDto, FilingsQuery, IngestRequest,
    IngestResponse, IngestStatusDto, TickerInfoDto, WireMode, WireSource, WireStatus,
};
