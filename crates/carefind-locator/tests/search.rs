//! End-to-end search tests against wiremock stand-ins for Nominatim and Gemini.

use std::time::Duration;

use carefind_core::{SearchRequest, ValidationError};
use carefind_gemini::GeminiClient;
use carefind_locator::{GeminiPlaceSearch, LocationQueryService, NominatimClient};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_AGENT: &str = "carefind-test/0.1 (integration)";

fn nominatim_service(base_url: &str) -> LocationQueryService<NominatimClient> {
    nominatim_service_with_timeout(base_url, 5)
}

fn nominatim_service_with_timeout(
    base_url: &str,
    timeout_secs: u64,
) -> LocationQueryService<NominatimClient> {
    let client = NominatimClient::with_base_url(base_url, 6, timeout_secs, USER_AGENT)
        .expect("client construction should not fail");
    LocationQueryService::new(client, "Ranchi")
}

fn gemini_service(base_url: &str) -> LocationQueryService<GeminiPlaceSearch> {
    gemini_service_with_timeout(base_url, 5)
}

fn gemini_service_with_timeout(
    base_url: &str,
    timeout_secs: u64,
) -> LocationQueryService<GeminiPlaceSearch> {
    let client =
        GeminiClient::with_base_url("test-key", "gemini-2.5-flash", timeout_secs, base_url)
            .expect("client construction should not fail");
    LocationQueryService::new(GeminiPlaceSearch::new(client), "Ranchi")
}

#[tokio::test]
async fn nominatim_results_keep_order_and_get_map_links() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "skin clinic in Ranchi"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "6"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "display_name": "Dermacare Clinic, Doranda, Ranchi",
                "lat": "23.3325",
                "lon": "85.3201",
                "type": "clinic"
            },
            {
                "display_name": "Apollo Clinic, Bariatu Road, Ranchi",
                "lat": "23.3890",
                "lon": "85.3360",
                "type": "clinic"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let svc = nominatim_service(&server.uri());
    let resp = svc
        .search(&SearchRequest::new("skin clinic", "Ranchi"))
        .await
        .expect("valid request");

    assert_eq!(resp.results.len(), 2);
    assert_eq!(
        resp.results[0].display_name,
        "Dermacare Clinic, Doranda, Ranchi"
    );
    assert_eq!(
        resp.results[0].map_uri,
        "https://www.google.com/maps/search/?api=1&query=23.3325,85.3201"
    );
    assert_eq!(resp.results[1].latitude, Some(23.389));
    assert!(resp.narrative_text.contains("2 places found"));
}

#[tokio::test]
async fn near_me_with_device_fix_searches_around_device_not_fallback() {
    let server = MockServer::start().await;

    // New Delhi, far from the Ranchi fallback.
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "cardiology"))
        .and(query_param("viewbox", "76.9590,28.8639,77.4590,28.3639"))
        .and(query_param("bounded", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "display_name": "AIIMS Cardiology, Ansari Nagar, New Delhi",
                "lat": "28.5672",
                "lon": "77.2100"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let resp = nominatim_service(&server.uri())
        .search(&SearchRequest::new("cardiology", "").near_me(Some((28.6139, 77.209))))
        .await
        .expect("valid request");

    assert_eq!(resp.results.len(), 1);
    assert!(resp.narrative_text.contains("cardiology near your current location"));

    let received = server.received_requests().await.expect("request recording on");
    let query = received[0].url.query().unwrap_or_default();
    assert!(!query.contains("Ranchi"), "{query}");
}

#[tokio::test]
async fn slow_nominatim_times_out_and_degrades() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let resp = nominatim_service_with_timeout(&server.uri(), 1)
        .search(&SearchRequest::new("cardiology", "Ranchi"))
        .await
        .expect("timeouts are not errors");
    assert!(resp.results.is_empty());
    assert!(resp.narrative_text.contains("connectivity"));
}

#[tokio::test]
async fn nominatim_server_error_degrades_to_connectivity_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let svc = nominatim_service(&server.uri());
    let resp = svc
        .search(&SearchRequest::new("cardiology", "Ranchi"))
        .await
        .expect("backend failures are not errors");

    assert!(resp.results.is_empty());
    assert!(resp.narrative_text.contains("connectivity"));
}

#[tokio::test]
async fn nominatim_malformed_body_degrades() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let resp = nominatim_service(&server.uri())
        .search(&SearchRequest::new("cardiology", "Ranchi"))
        .await
        .unwrap();
    assert!(resp.results.is_empty());
    assert!(resp.narrative_text.contains("connectivity"));
}

#[tokio::test]
async fn nominatim_zero_results_has_explanatory_narrative() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let resp = nominatim_service(&server.uri())
        .search(&SearchRequest::new("xenobiology", "Ranchi"))
        .await
        .unwrap();
    assert!(resp.results.is_empty());
    assert!(resp.narrative_text.contains("xenobiology in Ranchi"));
}

#[tokio::test]
async fn unreachable_server_degrades() {
    let resp = nominatim_service("http://127.0.0.1:1")
        .search(&SearchRequest::new("cardiology", "Ranchi"))
        .await
        .unwrap();
    assert!(resp.results.is_empty());
    assert!(resp.narrative_text.contains("connectivity"));
}

#[tokio::test]
async fn missing_location_is_rejected_without_network_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = nominatim_service(&server.uri())
        .search(&SearchRequest::new("cardiology", ""))
        .await
        .unwrap_err();
    assert_eq!(err, ValidationError::MissingLocation);
    assert_eq!(err.to_string(), "Please enter a city or select 'Near Me'.");
}

#[tokio::test]
async fn gemini_grounding_chunks_become_results() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "### Top cardiologists in Ranchi" }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "maps": { "uri": "https://maps.google.com/?cid=11", "title": "Medanta Hospital" } },
                        { "maps": { "title": "No link" } },
                        { "maps": { "uri": "https://maps.google.com/?cid=12", "title": "RIMS" } }
                    ]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = gemini_service(&server.uri())
        .search(&SearchRequest::new("cardiology", "Ranchi"))
        .await
        .unwrap();

    assert_eq!(resp.narrative_text, "### Top cardiologists in Ranchi");
    let names: Vec<_> = resp.results.iter().map(|r| r.display_name.as_str()).collect();
    assert_eq!(names, ["Medanta Hospital", "RIMS"]);
}

#[tokio::test]
async fn gemini_rejected_key_degrades() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED" }
        })))
        .mount(&server)
        .await;

    let resp = gemini_service(&server.uri())
        .search(&SearchRequest::new("cardiology", "Ranchi"))
        .await
        .unwrap();
    assert!(resp.results.is_empty());
    assert!(resp.narrative_text.contains("connectivity"));
}

#[tokio::test]
async fn slow_gemini_times_out_and_degrades() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "candidates": [] }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let resp = gemini_service_with_timeout(&server.uri(), 1)
        .search(&SearchRequest::new("cardiology", "Ranchi"))
        .await
        .unwrap();
    assert!(resp.results.is_empty());
    assert!(resp.narrative_text.contains("connectivity"));
}
