//! OpenStreetMap Nominatim search backend.
//!
//! Anonymous public usage requires a descriptive `User-Agent`; the client
//! refuses to build without one.

use std::fmt::Write as _;
use std::time::Duration;

use carefind_core::{PlaceResult, SearchResponse};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::backend::PlaceSearchBackend;
use crate::error::LocatorError;
use crate::query::{map_uri_for_coordinates, map_uri_for_name, ShapedQuery};

/// Half the side of the box a device-centred search is bounded to, in
/// degrees (about 25 km of latitude).
const DEVICE_VIEWBOX_HALF_SPAN_DEG: f64 = 0.25;

/// One element of the `/search?format=json` array.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    pub display_name: String,
    /// Decimal degrees as a string.
    pub lat: String,
    pub lon: String,
}

impl NominatimPlace {
    /// Normalize into a [`PlaceResult`]. Unparseable coordinates drop to
    /// `None` and the map link falls back to a name search.
    #[must_use]
    pub fn into_place_result(self) -> PlaceResult {
        let latitude = self.lat.trim().parse::<f64>().ok();
        let longitude = self.lon.trim().parse::<f64>().ok();
        let map_uri = match (latitude, longitude) {
            (Some(lat), Some(lon)) => map_uri_for_coordinates(lat, lon),
            _ => map_uri_for_name(&self.display_name),
        };
        PlaceResult {
            display_name: self.display_name,
            map_uri,
            latitude,
            longitude,
            review_snippet: None,
        }
    }
}

#[derive(Debug)]
pub struct NominatimClient {
    client: Client,
    search_url: Url,
    limit: u32,
}

impl NominatimClient {
    /// Creates a client against `base_url` (the public instance in
    /// production, a wiremock server in tests).
    ///
    /// # Errors
    ///
    /// - [`LocatorError::MissingClientIdentifier`] if `user_agent` is blank.
    /// - [`LocatorError::Http`] if the `reqwest::Client` cannot be built.
    /// - [`LocatorError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        limit: u32,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, LocatorError> {
        if user_agent.trim().is_empty() {
            return Err(LocatorError::MissingClientIdentifier {
                service: "nominatim",
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let search_url = Url::parse(&normalised)
            .and_then(|u| u.join("search"))
            .map_err(|e| LocatorError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            search_url,
            limit: limit.max(1),
        })
    }

    fn build_url(&self, query_text: &str, near: Option<(f64, f64)>) -> Url {
        let mut url = self.search_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", query_text)
                .append_pair("format", "json")
                .append_pair("limit", &self.limit.to_string())
                .append_pair("addressdetails", "1");
            if let Some((lat, lon)) = near {
                let d = DEVICE_VIEWBOX_HALF_SPAN_DEG;
                pairs
                    .append_pair(
                        "viewbox",
                        &format!("{:.4},{:.4},{:.4},{:.4}", lon - d, lat + d, lon + d, lat - d),
                    )
                    .append_pair("bounded", "1");
            }
        }
        url
    }

    /// Runs one search and returns the raw places in relevance order.
    ///
    /// With `near` set the search is bounded to a box around that
    /// `(latitude, longitude)`.
    ///
    /// # Errors
    ///
    /// - [`LocatorError::Http`] on network failure or timeout.
    /// - [`LocatorError::UnexpectedStatus`] on a non-2xx status.
    /// - [`LocatorError::Deserialize`] if the body is not a place array.
    pub async fn search_places(
        &self,
        query_text: &str,
        near: Option<(f64, f64)>,
    ) -> Result<Vec<NominatimPlace>, LocatorError> {
        let url = self.build_url(query_text, near);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LocatorError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.search_url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| LocatorError::Deserialize {
            context: format!("nominatim search(q={query_text})"),
            source: e,
        })
    }
}

impl PlaceSearchBackend for NominatimClient {
    fn name(&self) -> &'static str {
        "nominatim"
    }

    async fn fetch(&self, query: &ShapedQuery) -> Result<SearchResponse, LocatorError> {
        // A device-centred search sends the bare problem; the viewbox does
        // the locating.
        let term = if query.coordinates.is_some() {
            &query.problem
        } else {
            &query.text
        };
        let places = self.search_places(term, query.coordinates).await?;
        tracing::debug!(query = %query.text, count = places.len(), "nominatim search complete");

        if places.is_empty() {
            return Ok(SearchResponse::no_results(&query.text));
        }

        let results: Vec<PlaceResult> = places
            .into_iter()
            .map(NominatimPlace::into_place_result)
            .collect();

        Ok(SearchResponse {
            narrative_text: narrative_for(&query.text, &results),
            results,
        })
    }
}

fn narrative_for(query_text: &str, results: &[PlaceResult]) -> String {
    let mut text = format!(
        "### {} place{} found for **{query_text}**\n\n",
        results.len(),
        if results.len() == 1 { "" } else { "s" }
    );
    for (i, place) in results.iter().enumerate() {
        let _ = writeln!(
            text,
            "{}. **{}** ([View on map]({}))",
            i + 1,
            place.display_name,
            place.map_uri
        );
    }
    text
}
