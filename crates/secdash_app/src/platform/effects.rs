use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use dash_logging::{dash_info, dash_warn};
use secdash_client::{
    ClientCommand, ClientEvent, ClientHandle, FilingDto, FilingsQuery, IngestRequest,
    IngestResponse, IngestStatusDto, WireMode, WireSource, WireStatus,
};
use secdash_core::{
    Effect, FilingRecord, FilingSource, IngestMode, JobAccepted, JobCounters, JobRequest, JobState,
    JobStatus, Msg,
};

use super::render;

/// Executes core effects against the client handle and pumps client events
/// back into the message channel as core messages.
#[derive(Clone)]
pub struct EffectRunner {
    client: ClientHandle,
}

impl EffectRunner {
    pub fn new(client: ClientHandle, msg_tx: mpsc::Sender<Msg>) -> Self {
        let runner = Self { client };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitJob { request } => {
                    dash_info!(
                        "submit refresh mode={:?} symbols={:?}",
                        request.mode,
                        request.symbols
                    );
                    self.client.send(ClientCommand::Submit {
                        request: map_request(request),
                    });
                }
                Effect::FetchStatus { handle, generation } => {
                    self.client
                        .send(ClientCommand::FetchStatus { handle, generation });
                }
                Effect::SchedulePoll {
                    generation,
                    delay_ms,
                } => {
                    self.client.send(ClientCommand::PollAfter {
                        generation,
                        delay: Duration::from_millis(delay_ms),
                    });
                }
                Effect::ScheduleClear {
                    generation,
                    delay_ms,
                } => {
                    self.client.send(ClientCommand::ClearAfter {
                        generation,
                        delay: Duration::from_millis(delay_ms),
                    });
                }
                Effect::LoadHistory { limit } => {
                    self.client.send(ClientCommand::LoadHistory { limit });
                }
                Effect::LoadRecentFilings { days, limit } => {
                    self.client.send(ClientCommand::LoadFilings {
                        query: FilingsQuery {
                            forms: Vec::new(),
                            days: Some(days),
                            limit: Some(limit),
                        },
                    });
                }
                Effect::CheckHealth => {
                    self.client.send(ClientCommand::CheckHealth);
                }
            }
        }
    }

    pub fn lookup(&self, symbol: String) {
        self.client.send(ClientCommand::Lookup { symbol });
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let client = self.client.clone();
        thread::spawn(move || loop {
            if let Some(event) = client.try_recv() {
                if let Some(msg) = map_event(event) {
                    if msg_tx.send(msg).is_err() {
                        break;
                    }
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_event(event: ClientEvent) -> Option<Msg> {
    let msg = match event {
        ClientEvent::SubmitFinished { result } => match result {
            Ok(response) => Msg::SubmitSucceeded {
                accepted: map_accepted(response),
            },
            Err(err) => {
                dash_warn!("refresh submission failed: {}", err);
                Msg::SubmitFailed {
                    message: err.to_string(),
                }
            }
        },
        ClientEvent::StatusFetched { generation, result } => match result {
            Ok(status) => Msg::StatusFetched {
                generation,
                status: map_status(status),
            },
            Err(err) => {
                dash_warn!("status poll failed: {}", err);
                Msg::StatusFetchFailed {
                    generation,
                    message: err.to_string(),
                }
            }
        },
        ClientEvent::PollDue { generation } => Msg::PollDue { generation },
        ClientEvent::ClearDue { generation } => Msg::ClearDue { generation },
        ClientEvent::HistoryLoaded { result } => match result {
            Ok(jobs) => Msg::HistoryLoaded {
                jobs: jobs.into_iter().map(map_status).collect(),
            },
            Err(err) => Msg::HistoryLoadFailed {
                message: err.to_string(),
            },
        },
        ClientEvent::FilingsLoaded { result } => match result {
            Ok(filings) => Msg::FilingsLoaded {
                records: filings.into_iter().map(map_filing).collect(),
            },
            Err(err) => Msg::FilingsLoadFailed {
                message: err.to_string(),
            },
        },
        ClientEvent::HealthChecked { result } => match result {
            Ok(message) => Msg::HealthOk { message },
            Err(err) => Msg::HealthFailed {
                message: err.to_string(),
            },
        },
        ClientEvent::LookupFinished { symbol, result } => {
            // Lookup is a side query; it renders directly and never touches
            // the dashboard state machine.
            render::render_lookup(&symbol, &result);
            return None;
        }
    };
    Some(msg)
}

fn map_request(request: JobRequest) -> IngestRequest {
    IngestRequest {
        mode: match request.mode {
            IngestMode::Latest => WireMode::Latest,
            IngestMode::Today => WireMode::Today,
        },
        symbols: request.symbols,
    }
}

fn map_mode(mode: WireMode) -> IngestMode {
    match mode {
        WireMode::Latest => IngestMode::Latest,
        WireMode::Today => IngestMode::Today,
    }
}

fn map_state(status: WireStatus) -> JobState {
    match status {
        WireStatus::InProgress => JobState::InProgress,
        WireStatus::Completed => JobState::Completed,
        WireStatus::Failed => JobState::Failed,
    }
}

fn map_accepted(response: IngestResponse) -> JobAccepted {
    JobAccepted {
        handle: response.log_id,
        state: map_state(response.status),
        counters: JobCounters {
            processed: response.total_processed,
            inserted: response.total_inserted,
            skipped: response.total_skipped,
        },
        warnings: response.warnings.unwrap_or_default(),
    }
}

fn map_status(dto: IngestStatusDto) -> JobStatus {
    JobStatus {
        id: dto.id,
        requested_at: dto.request_timestamp,
        mode: map_mode(dto.mode),
        symbols: dto.symbols,
        state: map_state(dto.status),
        completed_at: dto.completed_at,
        counters: JobCounters {
            processed: dto.total_processed,
            inserted: dto.total_inserted,
            skipped: dto.total_skipped,
        },
        warnings: dto.warnings.unwrap_or_default(),
    }
}

fn map_filing(dto: FilingDto) -> FilingRecord {
    FilingRecord {
        id: dto.id,
        cik: dto.cik,
        accession_no: dto.accession_no,
        form: dto.form,
        filed_at: dto.filed_at,
        period_end: dto.period_end,
        primary_doc_url: dto.primary_doc_url,
        source: match dto.source {
            WireSource::DailyIndex => FilingSource::DailyIndex,
            WireSource::Submissions => FilingSource::Submissions,
        },
        ticker: dto.ticker,
        company_name: dto.company_name,
        created_at: dto.created_at,
    }
}
