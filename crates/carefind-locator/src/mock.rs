//! Canned search backend for offline and static deployments.
//!
//! Picks a response by keyword when the problem text names a known specialty
//! and otherwise rotates through the pool. The rotation cursor is injectable
//! so callers can replay a sequence.

use std::sync::Arc;
use std::time::Duration;

use carefind_core::{PlaceResult, RotationCursor, SearchResponse};

use crate::backend::PlaceSearchBackend;
use crate::error::LocatorError;
use crate::query::ShapedQuery;

struct CannedSearch {
    keywords: &'static [&'static str],
    narrative: &'static str,
    places: &'static [(&'static str, &'static str)],
}

/// `(title, uri)` pairs in the order a grounded answer would cite them.
const POOL: &[CannedSearch] = &[
    CannedSearch {
        keywords: &["cardio", "heart"],
        narrative: include_str!("../data/cardiology.md"),
        places: &[
            (
                "Medanta Hospital, Irba, Ranchi",
                "https://www.google.com/maps/search/Medanta+Hospital+Ranchi",
            ),
            (
                "Orchid Medical Centre, Lalpur, Ranchi",
                "https://www.google.com/maps/search/Orchid+Medical+Centre+Ranchi",
            ),
            (
                "Santevita Hospital, Morabadi, Ranchi",
                "https://www.google.com/maps/search/Santevita+Hospital+Ranchi",
            ),
            (
                "RIMS (Rajendra Institute of Medical Sciences), Bariatu, Ranchi",
                "https://www.google.com/maps/search/RIMS+Ranchi",
            ),
        ],
    },
    CannedSearch {
        keywords: &["skin", "derma"],
        narrative: include_str!("../data/dermatology.md"),
        places: &[
            (
                "Dermacare Clinic, Doranda, Ranchi",
                "https://www.google.com/maps/search/Dermacare+Clinic+Ranchi",
            ),
            (
                "Skin & Hair Clinic, Kanke Road, Ranchi",
                "https://www.google.com/maps/search/Skin+and+Hair+Clinic+Ranchi",
            ),
            (
                "Apollo Clinic, Bariatu Road, Ranchi",
                "https://www.google.com/maps/search/Apollo+Clinic+Ranchi",
            ),
        ],
    },
];

impl CannedSearch {
    fn to_response(&self) -> SearchResponse {
        SearchResponse {
            narrative_text: self.narrative.to_string(),
            results: self
                .places
                .iter()
                .map(|(title, uri)| PlaceResult {
                    display_name: (*title).to_string(),
                    map_uri: (*uri).to_string(),
                    latitude: None,
                    longitude: None,
                    review_snippet: None,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MockPlaceSearch {
    cursor: Arc<RotationCursor>,
    latency: Duration,
}

impl MockPlaceSearch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Share a cursor with the caller so it can be inspected or reset.
    #[must_use]
    pub fn with_cursor(cursor: Arc<RotationCursor>) -> Self {
        Self {
            cursor,
            latency: Duration::ZERO,
        }
    }

    /// Simulated round-trip delay, for exercising loading states.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Pool index for `problem`: keyword match first, rotation otherwise.
    /// Keyword matches do not move the cursor.
    fn select(&self, problem: &str) -> usize {
        let lowered = problem.to_lowercase();
        POOL.iter()
            .position(|c| c.keywords.iter().any(|k| lowered.contains(k)))
            .unwrap_or_else(|| self.cursor.advance(POOL.len()))
    }
}

impl PlaceSearchBackend for MockPlaceSearch {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch(&self, query: &ShapedQuery) -> Result<SearchResponse, LocatorError> {
        let index = self.select(&query.problem);
        tracing::debug!(query = %query.text, index, "serving canned search response");
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(POOL[index].to_response())
    }
}
