use std::collections::BTreeSet;

use crate::view::{compose_page, DashViewModel, WatchView, ITEMS_PER_PAGE};

/// Identifies one round of interest in a watched job. Replies tagged with an
/// older generation are discarded on arrival.
pub type Generation = u64;

/// Fixed cadence between status polls while the watched job is in progress.
pub const POLL_INTERVAL_MS: u64 = 2000;
/// Delay between the first terminal observation and leaving the progress tab.
pub const SETTLE_DELAY_MS: u64 = 2000;
/// Cadence of the backend liveness probe.
pub const HEALTH_INTERVAL_MS: u64 = 30_000;
/// How many entries the recent-jobs history shows.
pub const HISTORY_LIMIT: u32 = 10;
/// Window and cap for the background recent-filings query.
pub const RECENT_FILINGS_DAYS: u32 = 365;
pub const RECENT_FILINGS_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Progress,
    RecentFilings,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestMode {
    /// Latest submissions per issuer.
    Latest,
    /// Only filings submitted today, from the daily index.
    Today,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    InProgress,
    Completed,
    Failed,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobCounters {
    pub processed: u64,
    pub inserted: u64,
    pub skipped: u64,
}

/// Point-in-time snapshot of one ingestion job as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatus {
    pub id: String,
    pub requested_at: String,
    pub mode: IngestMode,
    /// `None` means the job covers all symbols.
    pub symbols: Option<Vec<String>>,
    pub state: JobState,
    /// Present iff `state` is terminal.
    pub completed_at: Option<String>,
    pub counters: JobCounters,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub mode: IngestMode,
    pub symbols: Option<Vec<String>>,
}

/// What the backend returns at submission time: the handle plus whatever the
/// submission response already knows about the job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobAccepted {
    pub handle: String,
    pub state: JobState,
    pub counters: JobCounters,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilingSource {
    DailyIndex,
    Submissions,
}

/// Immutable filing record as returned by the listing endpoint. The core only
/// interprets `form` (filtering) and `id` (stable list identity).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingRecord {
    pub id: i64,
    pub cik: String,
    pub accession_no: String,
    pub form: String,
    pub filed_at: String,
    pub period_end: Option<String>,
    pub primary_doc_url: String,
    pub source: FilingSource,
    pub ticker: Option<String>,
    pub company_name: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HealthState {
    #[default]
    Unknown,
    Healthy(String),
    Unreachable(String),
}

/// The single watched job. `settled` latches on the first terminal
/// observation so the settled effects fire exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Watch {
    pub handle: String,
    pub generation: Generation,
    pub snapshot: Option<JobStatus>,
    pub settled: bool,
}

/// Outcome of applying a fetched status to the current watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusOutcome {
    /// Stale generation or a regressive in-progress report after terminal.
    Ignored,
    /// Snapshot updated; job still in progress.
    InProgress,
    /// Snapshot updated; this was the first terminal observation.
    FirstTerminal,
    /// Snapshot updated; terminal was already observed earlier.
    AlreadySettled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashState {
    tab: Tab,
    watch: Option<Watch>,
    next_generation: Generation,
    submit_pending: bool,
    submit_error: Option<String>,
    poll_error: Option<String>,
    data_error: Option<String>,
    filters: BTreeSet<String>,
    current_page: usize,
    records: Vec<FilingRecord>,
    history: Vec<JobStatus>,
    health: HealthState,
    dirty: bool,
}

impl Default for DashState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashState {
    pub fn new() -> Self {
        Self {
            tab: Tab::default(),
            watch: None,
            next_generation: 0,
            submit_pending: false,
            submit_error: None,
            poll_error: None,
            data_error: None,
            filters: BTreeSet::new(),
            current_page: 1,
            records: Vec::new(),
            history: Vec::new(),
            health: HealthState::Unknown,
            dirty: false,
        }
    }

    pub fn view(&self) -> DashViewModel {
        let page = compose_page(&self.records, &self.filters, self.current_page, ITEMS_PER_PAGE);
        DashViewModel {
            tab: self.tab,
            watch: self.watch.as_ref().map(|watch| WatchView {
                handle: watch.handle.clone(),
                snapshot: watch.snapshot.clone(),
                settled: watch.settled,
            }),
            submit_pending: self.submit_pending,
            submit_error: self.submit_error.clone(),
            poll_error: self.poll_error.clone(),
            data_error: self.data_error.clone(),
            health: self.health.clone(),
            filters: self.filters.iter().cloned().collect(),
            page,
            history: self.history.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn submit_pending(&self) -> bool {
        self.submit_pending
    }

    pub(crate) fn begin_submit(&mut self) {
        self.submit_pending = true;
        self.submit_error = None;
        self.dirty = true;
    }

    pub(crate) fn submit_rejected(&mut self, message: String) {
        self.submit_pending = false;
        self.submit_error = Some(message);
        self.dirty = true;
    }

    /// Enters Watching for a freshly accepted job and switches to the
    /// progress tab. Returns the generation assigned to this watch.
    pub(crate) fn begin_watch(&mut self, accepted: &JobAccepted) -> Generation {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.watch = Some(Watch {
            handle: accepted.handle.clone(),
            generation,
            snapshot: None,
            settled: accepted.state.is_terminal(),
        });
        self.submit_pending = false;
        self.submit_error = None;
        self.poll_error = None;
        self.tab = Tab::Progress;
        self.dirty = true;
        generation
    }

    pub(crate) fn apply_status(&mut self, generation: Generation, status: JobStatus) -> StatusOutcome {
        let Some(watch) = self.watch.as_mut().filter(|w| w.generation == generation) else {
            return StatusOutcome::Ignored;
        };
        // A job never re-enters InProgress once observed terminal.
        if watch.settled && !status.state.is_terminal() {
            return StatusOutcome::Ignored;
        }
        let outcome = if !status.state.is_terminal() {
            StatusOutcome::InProgress
        } else if watch.settled {
            StatusOutcome::AlreadySettled
        } else {
            watch.settled = true;
            StatusOutcome::FirstTerminal
        };
        watch.snapshot = Some(status);
        self.poll_error = None;
        self.dirty = true;
        outcome
    }

    /// Records a transient poll failure. Returns true when the watch is still
    /// current and unsettled, i.e. when polling should continue.
    pub(crate) fn record_poll_error(&mut self, generation: Generation, message: String) -> bool {
        let Some(watch) = self.watch.as_ref().filter(|w| w.generation == generation) else {
            return false;
        };
        let keep_polling = !watch.settled;
        self.poll_error = Some(message);
        self.dirty = true;
        keep_polling
    }

    /// The handle to poll next, if this generation is still current and the
    /// job has not settled.
    pub(crate) fn poll_target(&self, generation: Generation) -> Option<String> {
        self.watch
            .as_ref()
            .filter(|w| w.generation == generation && !w.settled)
            .map(|w| w.handle.clone())
    }

    /// Drops the watch and moves to the recent-filings tab. Returns false for
    /// a stale generation.
    pub(crate) fn clear_watch(&mut self, generation: Generation) -> bool {
        let is_current = self
            .watch
            .as_ref()
            .is_some_and(|w| w.generation == generation);
        if is_current {
            self.watch = None;
            self.poll_error = None;
            self.tab = Tab::RecentFilings;
            self.dirty = true;
        }
        is_current
    }

    pub(crate) fn select_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.dirty = true;
        }
    }

    /// Toggles a form-type filter. Any filter change resets to page 1.
    pub(crate) fn toggle_filter(&mut self, form: String) {
        if !self.filters.remove(&form) {
            self.filters.insert(form);
        }
        self.current_page = 1;
        self.dirty = true;
    }

    pub(crate) fn select_page(&mut self, page: usize) {
        let requested = page.max(1);
        let view = compose_page(&self.records, &self.filters, requested, ITEMS_PER_PAGE);
        if self.current_page != view.effective_page {
            self.current_page = view.effective_page;
            self.dirty = true;
        }
    }

    /// Replaces the record collection wholesale and re-clamps the page so a
    /// shrunken data set cannot leave the page pointing past the end.
    pub(crate) fn set_records(&mut self, records: Vec<FilingRecord>) {
        self.records = records;
        self.data_error = None;
        let view = compose_page(&self.records, &self.filters, self.current_page, ITEMS_PER_PAGE);
        self.current_page = view.effective_page;
        self.dirty = true;
    }

    pub(crate) fn set_history(&mut self, jobs: Vec<JobStatus>) {
        self.history = jobs;
        self.data_error = None;
        self.dirty = true;
    }

    pub(crate) fn record_data_error(&mut self, message: String) {
        self.data_error = Some(message);
        self.dirty = true;
    }

    pub(crate) fn set_health(&mut self, health: HealthState) {
        if self.health != health {
            self.health = health;
            self.dirty = true;
        }
    }
}
