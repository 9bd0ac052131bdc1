use crate::state::StatusOutcome;
use crate::{
    DashState, Effect, HealthState, JobRequest, Msg, HISTORY_LIMIT, POLL_INTERVAL_MS,
    SETTLE_DELAY_MS,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: DashState, msg: Msg) -> (DashState, Vec<Effect>) {
    let effects = match msg {
        Msg::RefreshRequested { mode, symbols } => {
            // One submission at a time; the dialog is disabled while pending.
            if state.submit_pending() {
                return (state, Vec::new());
            }
            state.begin_submit();
            vec![Effect::SubmitJob {
                request: JobRequest {
                    mode,
                    symbols: normalize_symbols(symbols),
                },
            }]
        }
        Msg::SubmitSucceeded { accepted } => {
            let already_terminal = accepted.state.is_terminal();
            let handle = accepted.handle.clone();
            let generation = state.begin_watch(&accepted);
            // One confirmatory fetch either way; polls are only scheduled
            // from the handler of that fetch, never here.
            let mut effects = vec![Effect::FetchStatus { handle, generation }];
            if already_terminal {
                effects.push(Effect::LoadHistory { limit: HISTORY_LIMIT });
                effects.push(Effect::ScheduleClear {
                    generation,
                    delay_ms: SETTLE_DELAY_MS,
                });
            }
            effects
        }
        Msg::SubmitFailed { message } => {
            state.submit_rejected(message);
            Vec::new()
        }
        Msg::StatusFetched { generation, status } => match state.apply_status(generation, status) {
            StatusOutcome::Ignored | StatusOutcome::AlreadySettled => Vec::new(),
            StatusOutcome::InProgress => vec![Effect::SchedulePoll {
                generation,
                delay_ms: POLL_INTERVAL_MS,
            }],
            StatusOutcome::FirstTerminal => vec![
                Effect::LoadHistory { limit: HISTORY_LIMIT },
                Effect::ScheduleClear {
                    generation,
                    delay_ms: SETTLE_DELAY_MS,
                },
            ],
        },
        Msg::StatusFetchFailed { generation, message } => {
            // Transient: keep the last good snapshot and keep polling. Only
            // the backend's own reported state terminates the job.
            if state.record_poll_error(generation, message) {
                vec![Effect::SchedulePoll {
                    generation,
                    delay_ms: POLL_INTERVAL_MS,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::PollDue { generation } => match state.poll_target(generation) {
            Some(handle) => vec![Effect::FetchStatus { handle, generation }],
            None => Vec::new(),
        },
        Msg::ClearDue { generation } => {
            state.clear_watch(generation);
            Vec::new()
        }
        Msg::HistoryLoaded { jobs } => {
            state.set_history(jobs);
            Vec::new()
        }
        Msg::FilingsLoaded { records } => {
            state.set_records(records);
            Vec::new()
        }
        Msg::HistoryLoadFailed { message } | Msg::FilingsLoadFailed { message } => {
            state.record_data_error(message);
            Vec::new()
        }
        Msg::HealthOk { message } => {
            state.set_health(HealthState::Healthy(message));
            Vec::new()
        }
        Msg::HealthFailed { message } => {
            state.set_health(HealthState::Unreachable(message));
            Vec::new()
        }
        Msg::TabSelected { tab } => {
            state.select_tab(tab);
            Vec::new()
        }
        Msg::FilterToggled { form } => {
            state.toggle_filter(form);
            Vec::new()
        }
        Msg::PageSelected { page } => {
            state.select_page(page);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Trims, uppercases and dedupes symbol input, preserving first-seen order.
/// An empty result means "all symbols" and is sent as an absent field.
fn normalize_symbols(raw: Vec<String>) -> Option<Vec<String>> {
    let mut symbols: Vec<String> = Vec::new();
    for entry in raw {
        let symbol = entry.trim().to_ascii_uppercase();
        if !symbol.is_empty() && !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    if symbols.is_empty() {
        None
    } else {
        Some(symbols)
    }
}
