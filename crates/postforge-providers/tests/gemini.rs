use postforge_providers::{GeminiClient, ProviderError};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::with_base_url("gm-key", 5, &server.uri()).expect("client should build")
}

#[tokio::test]
async fn generate_content_returns_first_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .and(query_param("key", "gm-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{"parts": [{"text": "describe this"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "a structured answer"}]}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = client(&server)
        .generate_content("gemini-2.0-flash", "describe this", None)
        .await
        .unwrap();
    assert_eq!(text, "a structured answer");
}

#[tokio::test]
async fn generate_content_sends_inline_image_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{"parts": [
                {"inline_data": {"mime_type": "image/png"}},
                {"text": "what is in this image?"}
            ]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "a snack bar"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("inspo_1.png");
    std::fs::write(&image_path, b"png-bytes").unwrap();
    let attachment = postforge_providers::media::ImageAttachment::from_path(&image_path).unwrap();

    let text = client(&server)
        .generate_content("gemini-2.0-flash", "what is in this image?", Some(&attachment))
        .await
        .unwrap();
    assert_eq!(text, "a snack bar");
}

#[tokio::test]
async fn generate_image_decodes_base64_prediction() {
    let server = MockServer::start().await;
    let payload = base64_of(b"imagen-bytes");
    Mock::given(method("POST"))
        .and(path("/v1beta/models/imagen-3.0-generate-001:predict"))
        .and(query_param("key", "gm-key"))
        .and(body_partial_json(serde_json::json!({
            "instances": [{"prompt": "a flat lay of seeds"}],
            "parameters": {"sampleCount": 1}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "predictions": [{"bytesBase64Encoded": payload}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let bytes = client(&server)
        .generate_image("imagen-3.0-generate-001", "a flat lay of seeds")
        .await
        .unwrap();
    assert_eq!(bytes, b"imagen-bytes");
}

#[tokio::test]
async fn generate_image_without_predictions_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/imagen-3.0-generate-001:predict"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"predictions": []})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .generate_image("imagen-3.0-generate-001", "anything")
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::EmptyResponse));
}

#[tokio::test]
async fn api_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .generate_content("gemini-2.0-flash", "hello", None)
        .await
        .unwrap_err();
    match err {
        ProviderError::Api {
            provider,
            status,
            message,
        } => {
            assert_eq!(provider, "gemini");
            assert_eq!(status, 400);
            assert_eq!(message, "API key not valid");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

fn base64_of(bytes: &[u8]) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    STANDARD.encode(bytes)
}
