//! Secdash core: pure dashboard state machine and view composition.
mod effect;
mod msg;
mod state;
mod update;
mod view;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    DashState, FilingRecord, FilingSource, Generation, HealthState, IngestMode, JobAccepted,
    JobCounters, JobRequest, JobState, JobStatus, Tab, HEALTH_INTERVAL_MS, HISTORY_LIMIT,
    POLL_INTERVAL_MS, RECENT_FILINGS_DAYS, RECENT_FILINGS_LIMIT, SETTLE_DELAY_MS,
};
pub use update::update;
pub use view::{compose_page, DashViewModel, PageView, WatchView, ITEMS_PER_PAGE};
