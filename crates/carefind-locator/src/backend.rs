use std::future::Future;
use std::time::Duration;

use carefind_core::{AppConfig, SearchBackendKind, SearchResponse};
use carefind_gemini::GeminiClient;

use crate::error::LocatorError;
use crate::gemini::GeminiPlaceSearch;
use crate::mock::MockPlaceSearch;
use crate::nominatim::NominatimClient;
use crate::query::ShapedQuery;

/// One way of answering a shaped search.
///
/// Implementations report failures as errors; turning them into a degraded
/// response is the service's job.
pub trait PlaceSearchBackend: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    fn fetch(
        &self,
        query: &ShapedQuery,
    ) -> impl Future<Output = Result<SearchResponse, LocatorError>> + Send;
}

/// Backend chosen at configuration time.
#[derive(Debug)]
pub enum SearchBackend {
    Mock(MockPlaceSearch),
    Nominatim(NominatimClient),
    Gemini(GeminiPlaceSearch),
}

impl SearchBackend {
    /// Build the backend named by `config.search_backend`.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError`] if an HTTP client cannot be constructed, or
    /// [`LocatorError::MissingCredential`] if the Gemini backend is selected
    /// without a key (normally caught earlier by config loading).
    pub fn from_config(config: &AppConfig) -> Result<Self, LocatorError> {
        match config.search_backend {
            SearchBackendKind::Mock => Ok(Self::Mock(
                MockPlaceSearch::new().with_latency(Duration::from_millis(config.mock_latency_ms)),
            )),
            SearchBackendKind::Nominatim => Ok(Self::Nominatim(NominatimClient::with_base_url(
                &config.nominatim_base_url,
                config.nominatim_limit,
                config.request_timeout_secs,
                &config.user_agent,
            )?)),
            SearchBackendKind::Gemini => {
                let key = config
                    .gemini_api_key
                    .as_deref()
                    .ok_or_else(|| LocatorError::MissingCredential("GEMINI_API_KEY".to_string()))?;
                let client = GeminiClient::with_base_url(
                    key,
                    &config.gemini_model,
                    config.request_timeout_secs,
                    &config.gemini_base_url,
                )?;
                Ok(Self::Gemini(GeminiPlaceSearch::new(client)))
            }
        }
    }
}

impl PlaceSearchBackend for SearchBackend {
    fn name(&self) -> &'static str {
        match self {
            SearchBackend::Mock(b) => b.name(),
            SearchBackend::Nominatim(b) => b.name(),
            SearchBackend::Gemini(b) => b.name(),
        }
    }

    async fn fetch(&self, query: &ShapedQuery) -> Result<SearchResponse, LocatorError> {
        match self {
            SearchBackend::Mock(b) => b.fetch(query).await,
            SearchBackend::Nominatim(b) => b.fetch(query).await,
            SearchBackend::Gemini(b) => b.fetch(query).await,
        }
    }
}
