use std::collections::BTreeSet;

use crate::{FilingRecord, HealthState, JobStatus, Tab};

/// Fixed page size of the recent-filings list.
pub const ITEMS_PER_PAGE: usize = 10;

/// One derived page of the filtered filing list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub visible: Vec<FilingRecord>,
    pub filtered_count: usize,
    pub page_count: usize,
    /// The page actually shown; callers tracking their own page should adopt
    /// this when it differs from what they asked for.
    pub effective_page: usize,
}

/// Derives the visible slice from raw records plus filter and page state.
///
/// Pure and idempotent: safe to call on every render. An empty filter set
/// passes all records through; relative order is always preserved; a page
/// beyond the end clamps instead of erroring.
pub fn compose_page(
    records: &[FilingRecord],
    filters: &BTreeSet<String>,
    page: usize,
    page_size: usize,
) -> PageView {
    debug_assert!(page_size > 0);
    let filtered: Vec<&FilingRecord> = if filters.is_empty() {
        records.iter().collect()
    } else {
        records
            .iter()
            .filter(|record| filters.contains(record.form.as_str()))
            .collect()
    };
    let filtered_count = filtered.len();
    let page_count = filtered_count.div_ceil(page_size).max(1);
    let effective_page = page.clamp(1, page_count);
    let visible = filtered
        .into_iter()
        .skip((effective_page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();
    PageView {
        visible,
        filtered_count,
        page_count,
        effective_page,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchView {
    pub handle: String,
    pub snapshot: Option<JobStatus>,
    pub settled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashViewModel {
    pub tab: Tab,
    pub watch: Option<WatchView>,
    pub submit_pending: bool,
    pub submit_error: Option<String>,
    pub poll_error: Option<String>,
    pub data_error: Option<String>,
    pub health: HealthState,
    pub filters: Vec<String>,
    pub page: PageView,
    pub history: Vec<JobStatus>,
    pub dirty: bool,
}
