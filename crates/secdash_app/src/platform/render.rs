use secdash_client::{ApiError, TickerReport};
use secdash_core::{DashViewModel, HealthState, IngestMode, JobState, JobStatus, Tab};

pub fn print_help() {
    println!("commands:");
    println!("  refresh [latest|today] [SYMBOLS]   trigger an ingestion run");
    println!("  tab overview|progress|filings|history");
    println!("  filter <form-type>                 toggle a form filter (e.g. 10-K)");
    println!("  page <number>                      jump to a page of filings");
    println!("  reload                             refetch filings and history");
    println!("  health                             probe the backend now");
    println!("  stats <symbol>                     resolve a ticker and show stats");
    println!("  quit");
}

pub fn render(view: &DashViewModel) {
    println!();
    println!("==== secdash [{}] ====", tab_label(view.tab));

    match &view.health {
        HealthState::Unknown => {}
        HealthState::Healthy(message) => println!("backend: {message}"),
        HealthState::Unreachable(message) => {
            println!("!! backend unreachable: {message}");
        }
    }
    if let Some(message) = &view.submit_error {
        println!("!! refresh failed: {message}");
    }
    if let Some(message) = &view.poll_error {
        println!("!  status poll failing (showing last good snapshot): {message}");
    }
    if let Some(message) = &view.data_error {
        println!("!  data load failed: {message}");
    }
    if view.submit_pending {
        println!(".. submitting refresh request");
    }

    match view.tab {
        Tab::Overview => render_overview(),
        Tab::Progress => render_progress(view),
        Tab::RecentFilings => render_filings(view),
        Tab::History => render_history(view),
    }
}

fn render_overview() {
    println!("SEC EDGAR collection dashboard.");
    println!("Use 'refresh' to start an ingestion run, 'help' for all commands.");
}

fn render_progress(view: &DashViewModel) {
    let Some(watch) = &view.watch else {
        println!("no ingestion job in progress");
        return;
    };
    println!("job {}", watch.handle);
    match &watch.snapshot {
        Some(status) => render_job(status),
        None => println!("  waiting for first status report"),
    }
    if watch.settled {
        println!("  (finished; switching to recent filings shortly)");
    }
}

fn render_filings(view: &DashViewModel) {
    if !view.filters.is_empty() {
        println!("filters: {}", view.filters.join(", "));
    }
    let page = &view.page;
    if page.filtered_count == 0 {
        println!("no filings match");
        return;
    }
    println!(
        "{} filings, page {}/{}",
        page.filtered_count, page.effective_page, page.page_count
    );
    for filing in &page.visible {
        println!(
            "  [{:>6}] {:8} {}  {:10} {}",
            filing.id,
            filing.form,
            filing.filed_at,
            filing.ticker.as_deref().unwrap_or("-"),
            filing.company_name.as_deref().unwrap_or(&filing.cik),
        );
    }
}

fn render_history(view: &DashViewModel) {
    if view.history.is_empty() {
        println!("no ingestion history");
        return;
    }
    for job in &view.history {
        println!("  {} {}", job.id, job.requested_at);
        render_job(job);
    }
}

fn render_job(status: &JobStatus) {
    println!(
        "  {} ({}) processed={} inserted={} skipped={}",
        state_label(status.state),
        mode_label(status.mode),
        status.counters.processed,
        status.counters.inserted,
        status.counters.skipped,
    );
    if let Some(symbols) = &status.symbols {
        println!("  symbols: {}", symbols.join(", "));
    }
    if let Some(completed_at) = &status.completed_at {
        println!("  completed at {completed_at}");
    }
    for warning in &status.warnings {
        println!("  warning: {warning}");
    }
}

pub fn render_lookup(symbol: &str, result: &Result<TickerReport, ApiError>) {
    match result {
        Ok(report) => {
            println!(
                "{}: {} ({}, CIK {})",
                report.info.ticker, report.info.name, report.info.exchange, report.info.cik
            );
            println!(
                "  {} filings total, latest {}",
                report.stats.total_filings,
                report.stats.latest_filing.as_deref().unwrap_or("-")
            );
            for (form, count) in &report.stats.forms {
                println!("  {form:8} {count}");
            }
        }
        Err(err) => println!("? lookup for '{symbol}' failed: {err}"),
    }
}

fn tab_label(tab: Tab) -> &'static str {
    match tab {
        Tab::Overview => "overview",
        Tab::Progress => "progress",
        Tab::RecentFilings => "recent filings",
        Tab::History => "history",
    }
}

fn state_label(state: JobState) -> &'static str {
    match state {
        JobState::InProgress => "in progress",
        JobState::Completed => "completed",
        JobState::Failed => "FAILED",
    }
}

fn mode_label(mode: IngestMode) -> &'static str {
    match mode {
        IngestMode::Latest => "latest",
        IngestMode::Today => "today",
    }
}
