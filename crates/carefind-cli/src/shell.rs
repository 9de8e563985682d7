//! Line-oriented search loop.
//!
//! Every line starts a new search without waiting for the previous one. When
//! answers arrive out of order only the one for the latest line is printed.

use std::sync::Arc;

use carefind_core::{SearchRequest, SubmissionTracker};
use carefind_locator::LocationQueryService;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

use crate::search::render_search;

/// What one input line asks for.
#[derive(Debug, PartialEq)]
pub(crate) enum ShellLine {
    Search(SearchRequest),
    Quit,
    Blank,
}

/// `"<symptom> in <place>"`, `"<symptom> near me"`, or `quit`.
pub(crate) fn parse_line(line: &str) -> ShellLine {
    let line = line.trim();
    if line.is_empty() {
        return ShellLine::Blank;
    }
    if matches!(line.to_ascii_lowercase().as_str(), "quit" | "exit" | ":q") {
        return ShellLine::Quit;
    }

    let lowered = line.to_ascii_lowercase();
    if let Some(symptom) = lowered
        .strip_suffix("near me")
        .filter(|s| s.is_empty() || s.ends_with(' '))
        .map(|s| line[..s.len()].trim())
    {
        return ShellLine::Search(SearchRequest::new(symptom, "").near_me(None));
    }
    match lowered.rfind(" in ") {
        Some(idx) => ShellLine::Search(SearchRequest::new(&line[..idx], &line[idx + 4..])),
        None => ShellLine::Search(SearchRequest::new(line, "")),
    }
}

pub(crate) async fn run_shell(service: LocationQueryService) -> anyhow::Result<()> {
    let service = Arc::new(service);
    let tracker = Arc::new(SubmissionTracker::new());
    let mut tasks = JoinSet::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    eprintln!(
        "Type a search like \"skin clinic in Ranchi\" or \"cardiology near me\"; quit to exit."
    );

    while let Some(line) = lines.next_line().await? {
        let request = match parse_line(&line) {
            ShellLine::Quit => break,
            ShellLine::Blank => continue,
            ShellLine::Search(request) => request,
        };

        let ticket = tracker.begin();
        let service = Arc::clone(&service);
        let tracker = Arc::clone(&tracker);
        tasks.spawn(async move {
            let outcome = service.search(&request).await;
            match tracker.accept(ticket, outcome) {
                Some(Ok(response)) => print!("{}", render_search(&response)),
                Some(Err(e)) => eprintln!("{e}"),
                None => tracing::debug!(?ticket, "discarding superseded search result"),
            }
        });
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            tracing::warn!(error = %e, "search task failed");
        }
    }
    Ok(())
}
