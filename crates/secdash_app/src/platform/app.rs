use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use dash_logging::dash_info;
use secdash_client::{ClientHandle, ClientSettings};
use secdash_core::{
    update, DashState, Effect, Msg, HEALTH_INTERVAL_MS, HISTORY_LIMIT, RECENT_FILINGS_DAYS,
    RECENT_FILINGS_LIMIT,
};

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::{input, render};

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);

    let settings = ClientSettings::from_env();
    dash_info!("starting secdash against {}", settings.base_url);
    let client = ClientHandle::new(settings);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(client, msg_tx.clone());
    let quit = Arc::new(AtomicBool::new(false));

    // Initial loads, matching what the dashboard shows on entry.
    runner.run(vec![
        Effect::LoadRecentFilings {
            days: RECENT_FILINGS_DAYS,
            limit: RECENT_FILINGS_LIMIT,
        },
        Effect::LoadHistory { limit: HISTORY_LIMIT },
        Effect::CheckHealth,
    ]);

    // The liveness probe runs on its own fixed-interval timer, decoupled
    // from job polling.
    {
        let runner = runner.clone();
        let quit = quit.clone();
        thread::spawn(move || {
            let interval = Duration::from_millis(HEALTH_INTERVAL_MS);
            while !quit.load(Ordering::SeqCst) {
                thread::sleep(interval);
                runner.run(vec![Effect::CheckHealth]);
            }
        });
    }

    input::spawn_reader(msg_tx, runner.clone(), quit.clone());
    render::print_help();

    let mut state = DashState::new();
    render::render(&state.view());

    while let Ok(msg) = msg_rx.recv() {
        if quit.load(Ordering::SeqCst) {
            break;
        }
        let (next, effects) = update(std::mem::take(&mut state), msg);
        state = next;
        runner.run(effects);
        if state.consume_dirty() {
            render::render(&state.view());
        }
    }

    dash_info!("secdash shut down");
    Ok(())
}
