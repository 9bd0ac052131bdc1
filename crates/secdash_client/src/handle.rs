use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use dash_logging::dash_debug;

use crate::client::{ClientSettings, IngestApi, ReqwestIngestApi};
use crate::types::{
    ApiError, FilingDto, FilingStatsDto, FilingsQuery, IngestRequest, IngestResponse,
    IngestStatusDto, TickerInfoDto,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    Submit {
        request: IngestRequest,
    },
    FetchStatus {
        handle: String,
        generation: u64,
    },
    /// Emit `ClientEvent::PollDue { generation }` after `delay`.
    PollAfter {
        generation: u64,
        delay: Duration,
    },
    /// Emit `ClientEvent::ClearDue { generation }` after `delay`.
    ClearAfter {
        generation: u64,
        delay: Duration,
    },
    LoadHistory {
        limit: u32,
    },
    LoadFilings {
        query: FilingsQuery,
    },
    CheckHealth,
    /// Resolve a ticker and fetch its filing statistics.
    Lookup {
        symbol: String,
    },
}

#[derive(Debug)]
pub enum ClientEvent {
    SubmitFinished {
        result: Result<IngestResponse, ApiError>,
    },
    StatusFetched {
        generation: u64,
        result: Result<IngestStatusDto, ApiError>,
    },
    PollDue {
        generation: u64,
    },
    ClearDue {
        generation: u64,
    },
    HistoryLoaded {
        result: Result<Vec<IngestStatusDto>, ApiError>,
    },
    FilingsLoaded {
        result: Result<Vec<FilingDto>, ApiError>,
    },
    HealthChecked {
        result: Result<String, ApiError>,
    },
    LookupFinished {
        symbol: String,
        result: Result<TickerReport, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerReport {
    pub info: TickerInfoDto,
    pub stats: FilingStatsDto,
}

/// Runs API calls and timers on a dedicated tokio runtime thread. Commands go
/// in over a channel; results come back as events. Commands never block the
/// caller, and each command resolves to at most one event.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<ClientEvent>>>,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ClientCommand>();
        let (event_tx, event_rx) = mpsc::channel::<ClientEvent>();

        thread::spawn(move || {
            let api = Arc::new(ReqwestIngestApi::new(&settings).expect("http client"));
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn send(&self, command: ClientCommand) {
        let _ = self.cmd_tx.send(command);
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    api: &dyn IngestApi,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    dash_debug!("client command: {:?}", command);
    let event = match command {
        ClientCommand::Submit { request } => ClientEvent::SubmitFinished {
            result: api.submit_job(&request).await,
        },
        ClientCommand::FetchStatus { handle, generation } => ClientEvent::StatusFetched {
            generation,
            result: api.fetch_status(&handle).await,
        },
        ClientCommand::PollAfter { generation, delay } => {
            tokio::time::sleep(delay).await;
            ClientEvent::PollDue { generation }
        }
        ClientCommand::ClearAfter { generation, delay } => {
            tokio::time::sleep(delay).await;
            ClientEvent::ClearDue { generation }
        }
        ClientCommand::LoadHistory { limit } => ClientEvent::HistoryLoaded {
            result: api.list_recent_jobs(limit).await,
        },
        ClientCommand::LoadFilings { query } => ClientEvent::FilingsLoaded {
            result: api.list_recent_filings(&query).await,
        },
        ClientCommand::CheckHealth => ClientEvent::HealthChecked {
            result: api.check_health().await,
        },
        ClientCommand::Lookup { symbol } => {
            let result = lookup(api, &symbol).await;
            ClientEvent::LookupFinished { symbol, result }
        }
    };
    let _ = event_tx.send(event);
}

async fn lookup(api: &dyn IngestApi, symbol: &str) -> Result<TickerReport, ApiError> {
    let info = api.resolve_ticker(symbol).await?;
    let stats = api.filing_stats(&info.ticker).await?;
    Ok(TickerReport { info, stats })
}
