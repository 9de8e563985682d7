//! Gemini-backed prescription analysis against a wiremock server.

use std::time::Duration;

use carefind_core::PrescriptionImage;
use carefind_gemini::GeminiClient;
use carefind_rx::{DocumentExtractionService, ExtractionError, GeminiAnalyzer};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn service(base_url: &str) -> DocumentExtractionService<GeminiAnalyzer> {
    service_with_timeout(base_url, 5)
}

fn service_with_timeout(
    base_url: &str,
    timeout_secs: u64,
) -> DocumentExtractionService<GeminiAnalyzer> {
    let client =
        GeminiClient::with_base_url("test-key", "gemini-2.5-flash", timeout_secs, base_url)
            .expect("client construction should not fail");
    DocumentExtractionService::new(GeminiAnalyzer::new(client), 1024 * 1024)
}

fn photo() -> PrescriptionImage {
    PrescriptionImage::new(b"fake-jpeg".to_vec(), "image/jpeg")
}

fn model_answer(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    }))
}

#[tokio::test]
async fn two_medicines_come_back_in_order() {
    let server = MockServer::start().await;

    let answer = json!({
        "medicines": [
            {
                "name": "Azithromycin 500mg",
                "purpose": "Antibiotic for respiratory infection",
                "contents": "Azithromycin",
                "dosageInstructions": "Once daily for 3 days"
            },
            {
                "name": "Cetirizine 10mg",
                "purpose": "unclear",
                "contents": "Cetirizine hydrochloride",
                "warnings": "May cause drowsiness"
            }
        ],
        "summary": "Short antibiotic course with an antihistamine."
    })
    .to_string();

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{ "inlineData": { "mimeType": "image/jpeg" } }] }],
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(model_answer(&answer))
        .expect(1)
        .mount(&server)
        .await;

    let report = service(&server.uri())
        .analyze(&photo())
        .await
        .expect("valid report");

    assert_eq!(report.medicines.len(), 2);
    assert_eq!(report.medicines[0].name, "Azithromycin 500mg");
    assert_eq!(
        report.medicines[0].dosage_instructions.as_deref(),
        Some("Once daily for 3 days")
    );
    assert_eq!(report.medicines[1].name, "Cetirizine 10mg");
    assert_eq!(report.medicines[1].purpose, "unclear");
    assert_eq!(
        report.clinical_summary,
        "Short antibiotic course with an antihistamine."
    );
}

#[tokio::test]
async fn malformed_json_is_an_extraction_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(model_answer("{\"medicines\": [{\"name\": \"Amox"))
        .mount(&server)
        .await;

    let err = service(&server.uri()).analyze(&photo()).await.unwrap_err();
    assert!(matches!(err, ExtractionError::Schema { .. }), "{err:?}");
    assert!(err.user_message().contains("clearer image"));
}

#[tokio::test]
async fn server_error_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = service(&server.uri()).analyze(&photo()).await.unwrap_err();
    assert!(matches!(err, ExtractionError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn slow_model_times_out_as_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(model_answer("{}").set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let err = service_with_timeout(&server.uri(), 1)
        .analyze(&photo())
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractionError::Transport(_)), "{err:?}");
    assert!(err.user_message().contains("clearer image"));
}

#[tokio::test]
async fn unreadable_envelope_is_schema_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let err = service(&server.uri()).analyze(&photo()).await.unwrap_err();
    assert!(matches!(err, ExtractionError::Schema { .. }), "{err:?}");
}

#[tokio::test]
async fn oversized_image_never_reaches_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(model_answer("{}"))
        .expect(0)
        .mount(&server)
        .await;

    let client = GeminiClient::with_base_url("test-key", "gemini-2.5-flash", 5, &server.uri())
        .expect("client construction should not fail");
    let svc = DocumentExtractionService::new(GeminiAnalyzer::new(client), 4);

    let err = svc.analyze(&photo()).await.unwrap_err();
    assert!(matches!(err, ExtractionError::Validation(_)));
}
