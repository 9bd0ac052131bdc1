#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User confirmed the refresh dialog with a mode and raw symbol input.
    RefreshRequested {
        mode: crate::IngestMode,
        symbols: Vec<String>,
    },
    /// Backend accepted the refresh and returned a job handle.
    SubmitSucceeded { accepted: crate::JobAccepted },
    /// Submission failed; the watch is never entered.
    SubmitFailed { message: String },
    /// A status poll resolved for the generation it was issued under.
    StatusFetched {
        generation: crate::Generation,
        status: crate::JobStatus,
    },
    /// A status poll failed transiently.
    StatusFetchFailed {
        generation: crate::Generation,
        message: String,
    },
    /// The poll timer elapsed.
    PollDue { generation: crate::Generation },
    /// The settle delay elapsed; time to leave the progress tab.
    ClearDue { generation: crate::Generation },
    /// Recent-jobs history arrived.
    HistoryLoaded { jobs: Vec<crate::JobStatus> },
    HistoryLoadFailed { message: String },
    /// A fresh recent-filings collection arrived (wholesale replacement).
    FilingsLoaded { records: Vec<crate::FilingRecord> },
    FilingsLoadFailed { message: String },
    /// Liveness probe results.
    HealthOk { message: String },
    HealthFailed { message: String },
    /// User switched tabs directly.
    TabSelected { tab: crate::Tab },
    /// User toggled one form-type filter chip.
    FilterToggled { form: String },
    /// User picked a page in the pagination control.
    PageSelected { page: usize },
    /// Fallback for placeholder wiring.
    NoOp,
}
