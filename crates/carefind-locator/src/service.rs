use carefind_core::{
    validate_search_request, AppConfig, SearchRequest, SearchResponse, ValidationError,
};

use crate::backend::{PlaceSearchBackend, SearchBackend};
use crate::error::LocatorError;
use crate::query::ShapedQuery;

/// Front door for provider search.
#[derive(Debug)]
pub struct LocationQueryService<B: PlaceSearchBackend = SearchBackend> {
    backend: B,
    fallback_location: String,
}

impl LocationQueryService<SearchBackend> {
    /// Build the service with the backend `config` selects.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError`] if the backend's HTTP client cannot be built
    /// or a required credential is missing.
    pub fn from_config(config: &AppConfig) -> Result<Self, LocatorError> {
        let backend = SearchBackend::from_config(config)?;
        tracing::info!(
            backend = backend.name(),
            fallback = %config.fallback_location,
            "search backend ready"
        );
        Ok(Self::new(backend, config.fallback_location.clone()))
    }
}

impl<B: PlaceSearchBackend> LocationQueryService<B> {
    pub fn new(backend: B, fallback_location: impl Into<String>) -> Self {
        Self {
            backend,
            fallback_location: fallback_location.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Validate, shape, and run one search.
    ///
    /// Invalid input is rejected before any backend call. Backend failures
    /// are logged and returned as [`SearchResponse::connectivity_problem`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the symptom or location is missing.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ValidationError> {
        validate_search_request(request)?;
        let query = ShapedQuery::from_request(request, &self.fallback_location);

        match self.backend.fetch(&query).await {
            Ok(response)
                if response.results.is_empty() && response.narrative_text.trim().is_empty() =>
            {
                Ok(SearchResponse::no_results(&query.text))
            }
            Ok(response) => {
                tracing::info!(
                    backend = self.backend.name(),
                    query = %query.text,
                    results = response.results.len(),
                    "search complete"
                );
                Ok(response)
            }
            Err(LocatorError::Validation(e)) => Err(e),
            Err(e) => {
                tracing::warn!(
                    backend = self.backend.name(),
                    query = %query.text,
                    error = %e,
                    "search backend failed; returning degraded response"
                );
                Ok(SearchResponse::connectivity_problem())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use carefind_core::PlaceResult;

    use super::*;

    #[derive(Default)]
    struct RecordingBackend {
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
        fail: bool,
        blank: bool,
    }

    impl PlaceSearchBackend for RecordingBackend {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn fetch(&self, query: &ShapedQuery) -> Result<SearchResponse, LocatorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(query.text.clone());
            if self.fail {
                return Err(LocatorError::UnexpectedStatus {
                    status: 503,
                    url: "http://test/search".to_string(),
                });
            }
            if self.blank {
                return Ok(SearchResponse {
                    narrative_text: "  ".to_string(),
                    results: vec![],
                });
            }
            Ok(SearchResponse {
                narrative_text: "found".to_string(),
                results: vec![PlaceResult {
                    display_name: "Clinic".to_string(),
                    map_uri: "https://maps.example/clinic".to_string(),
                    latitude: None,
                    longitude: None,
                    review_snippet: None,
                }],
            })
        }
    }

    fn service(backend: RecordingBackend) -> LocationQueryService<RecordingBackend> {
        LocationQueryService::new(backend, "Ranchi")
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_backend() {
        let svc = service(RecordingBackend::default());
        let err = svc.search(&SearchRequest::new("", "")).await.unwrap_err();
        assert_eq!(err, ValidationError::MissingSymptomAndLocation);
        let err = svc.search(&SearchRequest::new("fever", " ")).await.unwrap_err();
        assert_eq!(err, ValidationError::MissingLocation);
        assert_eq!(svc.backend().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn backend_receives_shaped_text() {
        let svc = service(RecordingBackend::default());
        let resp = svc
            .search(&SearchRequest::new(" skin clinic ", "Ranchi"))
            .await
            .unwrap();
        assert_eq!(resp.results.len(), 1);
        assert_eq!(
            svc.backend().seen.lock().unwrap().as_slice(),
            ["skin clinic in Ranchi"]
        );
    }

    #[tokio::test]
    async fn near_me_without_coordinates_uses_fallback() {
        let svc = service(RecordingBackend::default());
        svc.search(&SearchRequest::new("cardiology", "").near_me(None))
            .await
            .unwrap();
        assert_eq!(
            svc.backend().seen.lock().unwrap().as_slice(),
            ["cardiology in Ranchi"]
        );
    }

    #[tokio::test]
    async fn near_me_with_coordinates_skips_fallback() {
        let svc = service(RecordingBackend::default());
        svc.search(&SearchRequest::new("cardiology", "").near_me(Some((28.61, 77.2))))
            .await
            .unwrap();
        assert_eq!(
            svc.backend().seen.lock().unwrap().as_slice(),
            ["cardiology near your current location"]
        );
    }

    #[tokio::test]
    async fn backend_failure_degrades() {
        let svc = service(RecordingBackend {
            fail: true,
            ..RecordingBackend::default()
        });
        let resp = svc
            .search(&SearchRequest::new("cardiology", "Ranchi"))
            .await
            .unwrap();
        assert!(resp.results.is_empty());
        assert!(resp.narrative_text.contains("connectivity"));
    }

    #[tokio::test]
    async fn blank_empty_answer_gets_no_results_narrative() {
        let svc = service(RecordingBackend {
            blank: true,
            ..RecordingBackend::default()
        });
        let resp = svc
            .search(&SearchRequest::new("cardiology", "Ranchi"))
            .await
            .unwrap();
        assert!(resp.results.is_empty());
        assert!(resp.narrative_text.contains("cardiology in Ranchi"));
    }
}
