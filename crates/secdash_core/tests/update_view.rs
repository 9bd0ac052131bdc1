use secdash_core::{update, DashState, FilingRecord, FilingSource, HealthState, Msg, Tab};

fn filing(id: i64, form: &str) -> FilingRecord {
    FilingRecord {
        id,
        cik: format!("{id:010}"),
        accession_no: format!("0000000000-25-{id:06}"),
        form: form.to_string(),
        filed_at: "2025-06-02".to_string(),
        period_end: None,
        primary_doc_url: format!("https://www.sec.gov/doc/{id}"),
        source: FilingSource::DailyIndex,
        ticker: Some("AAPL".to_string()),
        company_name: Some("Apple Inc.".to_string()),
        created_at: "2025-06-02T10:00:00Z".to_string(),
    }
}

fn load(state: DashState, count: i64, form: &str) -> DashState {
    let records = (1..=count).map(|id| filing(id, form)).collect();
    let (state, effects) = update(state, Msg::FilingsLoaded { records });
    assert!(effects.is_empty());
    state
}

#[test]
fn twelve_records_paginate_ten_then_two() {
    let state = load(DashState::new(), 12, "10-K");

    let view = state.view();
    assert_eq!(view.page.page_count, 2);
    assert_eq!(view.page.visible.len(), 10);

    let (state, _) = update(state, Msg::PageSelected { page: 2 });
    let view = state.view();
    assert_eq!(view.page.effective_page, 2);
    assert_eq!(view.page.visible.len(), 2);
    assert_eq!(view.page.visible[0].id, 11);
}

#[test]
fn filter_change_resets_to_page_one() {
    let state = load(DashState::new(), 30, "8-K");
    let (state, _) = update(state, Msg::PageSelected { page: 3 });
    assert_eq!(state.view().page.effective_page, 3);

    let (state, _) = update(
        state,
        Msg::FilterToggled {
            form: "8-K".to_string(),
        },
    );
    let view = state.view();
    assert_eq!(view.filters, vec!["8-K".to_string()]);
    assert_eq!(view.page.effective_page, 1);

    // Toggling the same chip off also resets the page.
    let (state, _) = update(
        state,
        Msg::FilterToggled {
            form: "8-K".to_string(),
        },
    );
    assert!(state.view().filters.is_empty());
    assert_eq!(state.view().page.effective_page, 1);
}

#[test]
fn filtering_hides_non_matching_forms() {
    let state = DashState::new();
    let records = vec![
        filing(1, "10-K"),
        filing(2, "10-Q"),
        filing(3, "8-K"),
        filing(4, "4"),
    ];
    let (state, _) = update(state, Msg::FilingsLoaded { records });
    let (state, _) = update(
        state,
        Msg::FilterToggled {
            form: "10-K".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::FilterToggled {
            form: "8-K".to_string(),
        },
    );

    let view = state.view();
    assert_eq!(view.page.filtered_count, 2);
    let ids: Vec<_> = view.page.visible.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn shrinking_data_heals_an_out_of_range_page() {
    let state = load(DashState::new(), 25, "10-Q");
    let (state, _) = update(state, Msg::PageSelected { page: 3 });
    assert_eq!(state.view().page.effective_page, 3);

    // Wholesale replacement with fewer records; page 3 no longer exists.
    let state = load(state, 5, "10-Q");
    let view = state.view();
    assert_eq!(view.page.page_count, 1);
    assert_eq!(view.page.effective_page, 1);
    assert_eq!(view.page.visible.len(), 5);
}

#[test]
fn page_selection_is_clamped_on_entry() {
    let state = load(DashState::new(), 12, "10-K");
    let (state, _) = update(state, Msg::PageSelected { page: 99 });
    assert_eq!(state.view().page.effective_page, 2);
    let (state, _) = update(state, Msg::PageSelected { page: 0 });
    assert_eq!(state.view().page.effective_page, 1);
}

#[test]
fn health_probe_drives_the_banner() {
    let mut state = DashState::new();
    assert_eq!(state.view().health, HealthState::Unknown);
    assert!(!state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::HealthOk {
            message: "Ingestion service is running".to_string(),
        },
    );
    assert_eq!(
        state.view().health,
        HealthState::Healthy("Ingestion service is running".to_string())
    );
    assert!(state.consume_dirty());

    // Same reading again is not a render-worthy change.
    let (mut state, _) = update(
        state,
        Msg::HealthOk {
            message: "Ingestion service is running".to_string(),
        },
    );
    assert!(!state.consume_dirty());

    let (state, _) = update(
        state,
        Msg::HealthFailed {
            message: "transport error: connection refused".to_string(),
        },
    );
    assert!(matches!(state.view().health, HealthState::Unreachable(_)));
}

#[test]
fn tab_selection_and_data_errors_are_tracked() {
    let state = DashState::new();
    let (state, _) = update(state, Msg::TabSelected { tab: Tab::History });
    assert_eq!(state.view().tab, Tab::History);

    let (state, _) = update(
        state,
        Msg::FilingsLoadFailed {
            message: "server error 500: boom".to_string(),
        },
    );
    assert_eq!(
        state.view().data_error.as_deref(),
        Some("server error 500: boom")
    );

    // A successful reload clears the soft error.
    let state = load(state, 3, "10-K");
    assert!(state.view().data_error.is_none());
}
