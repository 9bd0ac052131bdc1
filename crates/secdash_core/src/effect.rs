#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitJob {
        request: crate::JobRequest,
    },
    FetchStatus {
        handle: String,
        generation: crate::Generation,
    },
    /// Arrange for `Msg::PollDue { generation }` after `delay_ms`.
    SchedulePoll {
        generation: crate::Generation,
        delay_ms: u64,
    },
    /// Arrange for `Msg::ClearDue { generation }` after `delay_ms`.
    ScheduleClear {
        generation: crate::Generation,
        delay_ms: u64,
    },
    LoadHistory {
        limit: u32,
    },
    LoadRecentFilings {
        days: u32,
        limit: u32,
    },
    CheckHealth,
}
