//! Generative search backend using Gemini with Google Maps grounding.

use carefind_core::{PlaceResult, SearchResponse};
use carefind_gemini::{
    GeminiClient, GenerateContentRequest, GroundingChunk, LatLng, Part, RetrievalConfig, Tool,
    ToolConfig,
};

use crate::backend::PlaceSearchBackend;
use crate::error::LocatorError;
use crate::query::ShapedQuery;

#[derive(Debug)]
pub struct GeminiPlaceSearch {
    client: GeminiClient,
}

impl GeminiPlaceSearch {
    #[must_use]
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Prompt plus maps tool, biased to the device position when known.
    #[must_use]
    pub fn build_request(query: &ShapedQuery) -> GenerateContentRequest {
        let mut prompt = match query.coordinates {
            Some((lat, lon)) => format!(
                "Find the top-rated doctors, clinics or hospitals for \"{}\" near the \
                 patient's current location (latitude {lat}, longitude {lon}).",
                query.problem
            ),
            None => format!(
                "Find the top-rated doctors, clinics or hospitals for \"{}\" in {}.",
                query.problem, query.location
            ),
        };
        prompt.push_str(
            " For each result give the name, the facility and area, their expertise, \
             and why patients rate them highly. Format the answer as a markdown list \
             under a short heading. Do not invent places that are not on Google Maps.",
        );

        let mut request = GenerateContentRequest::user(vec![Part::text(prompt)]);
        request.tools.push(Tool::google_maps());
        request.tool_config = query.coordinates.map(|(latitude, longitude)| ToolConfig {
            retrieval_config: RetrievalConfig {
                lat_lng: LatLng {
                    latitude,
                    longitude,
                },
            },
        });
        request
    }
}

/// Normalize one grounding reference. Maps references win over web ones;
/// chunks without a URI are dropped.
#[must_use]
pub fn place_from_chunk(chunk: &GroundingChunk) -> Option<PlaceResult> {
    if let Some(maps) = &chunk.maps {
        let uri = maps.uri.as_deref().filter(|u| !u.trim().is_empty())?;
        return Some(PlaceResult {
            display_name: maps.title.clone().unwrap_or_else(|| uri.to_string()),
            map_uri: uri.to_string(),
            latitude: None,
            longitude: None,
            review_snippet: maps.first_review_snippet().map(ToOwned::to_owned),
        });
    }
    let web = chunk.web.as_ref()?;
    let uri = web.uri.as_deref().filter(|u| !u.trim().is_empty())?;
    Some(PlaceResult {
        display_name: web.title.clone().unwrap_or_else(|| uri.to_string()),
        map_uri: uri.to_string(),
        latitude: None,
        longitude: None,
        review_snippet: None,
    })
}

impl PlaceSearchBackend for GeminiPlaceSearch {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn fetch(&self, query: &ShapedQuery) -> Result<SearchResponse, LocatorError> {
        let request = Self::build_request(query);
        let response = self.client.generate_content(&request).await?;

        let results: Vec<PlaceResult> = response
            .grounding_chunks()
            .iter()
            .filter_map(place_from_chunk)
            .collect();

        tracing::debug!(
            query = %query.text,
            model = self.client.model(),
            count = results.len(),
            "gemini grounded search complete"
        );

        match response.text() {
            Some(narrative) if !narrative.trim().is_empty() => Ok(SearchResponse {
                narrative_text: narrative,
                results,
            }),
            _ if results.is_empty() => Ok(SearchResponse::no_results(&query.text)),
            _ => Ok(SearchResponse {
                narrative_text: format!("Places matching **{}**:", query.text),
                results,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carefind_core::SearchRequest;

    #[test]
    fn request_without_coordinates_has_no_tool_config() {
        let q = ShapedQuery::from_request(&SearchRequest::new("cardiology", "Ranchi"), "Ranchi");
        let req = GeminiPlaceSearch::build_request(&q);
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("toolConfig").is_none());
        assert_eq!(json["tools"][0]["googleMaps"], serde_json::json!({}));
        let prompt = json["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("\"cardiology\" in Ranchi"));
    }

    #[test]
    fn request_with_coordinates_sets_lat_lng_bias() {
        let req = SearchRequest::new("cardiology", "").near_me(Some((28.61, 77.2)));
        let q = ShapedQuery::from_request(&req, "Ranchi");
        let json = serde_json::to_value(GeminiPlaceSearch::build_request(&q)).unwrap();
        assert_eq!(
            json["toolConfig"]["retrievalConfig"]["latLng"]["longitude"],
            77.2
        );
        let prompt = json["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("near the patient's current location"));
        assert!(!prompt.contains("Ranchi"));
    }

    #[test]
    fn chunk_normalization() {
        let chunk: GroundingChunk = serde_json::from_value(serde_json::json!({
            "maps": {
                "uri": "https://maps.google.com/?cid=7",
                "title": "Orchid Medical Centre",
                "placeAnswerSources": { "reviewSnippets": [{ "snippet": "Clean and quick" }] }
            }
        }))
        .unwrap();
        let place = place_from_chunk(&chunk).unwrap();
        assert_eq!(place.display_name, "Orchid Medical Centre");
        assert_eq!(place.map_uri, "https://maps.google.com/?cid=7");
        assert_eq!(place.review_snippet.as_deref(), Some("Clean and quick"));
    }

    #[test]
    fn chunk_without_uri_is_dropped() {
        let chunk: GroundingChunk =
            serde_json::from_value(serde_json::json!({ "maps": { "title": "No link" } })).unwrap();
        assert!(place_from_chunk(&chunk).is_none());
        let empty: GroundingChunk = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(place_from_chunk(&empty).is_none());
    }

    #[test]
    fn untitled_web_chunk_uses_uri_as_name() {
        let chunk: GroundingChunk = serde_json::from_value(serde_json::json!({
            "web": { "uri": "https://example.org/clinic" }
        }))
        .unwrap();
        let place = place_from_chunk(&chunk).unwrap();
        assert_eq!(place.display_name, "https://example.org/clinic");
    }
}
