use std::fmt::Write as _;

use carefind_core::{SearchRequest, SearchResponse};
use carefind_locator::LocationQueryService;

/// Run one search and print the narrative followed by the result links.
///
/// # Errors
///
/// Returns the validation message when the request is incomplete. Backend
/// outages are not errors; they print the degraded narrative.
pub(crate) async fn run_search(
    service: &LocationQueryService,
    request: &SearchRequest,
    json: bool,
) -> anyhow::Result<()> {
    let response = service.search(request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render_search(&response));
    }
    Ok(())
}

pub(crate) fn render_search(response: &SearchResponse) -> String {
    let mut out = response.narrative_text.trim_end().to_string();
    out.push('\n');
    if !response.results.is_empty() {
        out.push_str("\nSources:\n");
        for (i, place) in response.results.iter().enumerate() {
            let _ = writeln!(out, "  {}. {} <{}>", i + 1, place.display_name, place.map_uri);
            if let Some(snippet) = &place.review_snippet {
                let _ = writeln!(out, "     \"{snippet}\"");
            }
        }
    }
    out
}
