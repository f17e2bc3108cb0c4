//! Workers AI client tests against a mocked Cloudflare API
//!
//! These tests use wiremock to stand in for `/accounts/{id}/ai/run/{model}`
//! and validate envelope handling and error mapping.

use bookwise::llm::workers_ai::WorkersAiClient;
use bookwise::llm::{InferenceOutput, LLMClient};
use bookwise::types::{AppError, ChatMessage};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "@cf/meta/llama-3.3-70b-instruct-fp8-fast";
const RUN_PATH: &str = "/accounts/acct-123/ai/run/@cf/meta/llama-3.3-70b-instruct-fp8-fast";

// ============= Helper Functions =============

fn client_for(server: &MockServer) -> WorkersAiClient {
    WorkersAiClient::new(
        "acct-123".to_string(),
        "secret-token".to_string(),
        server.uri(),
        MODEL.to_string(),
    )
    .expect("Failed to build client")
}

fn envelope(result: serde_json::Value) -> serde_json::Value {
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": result
    })
}

fn conversation() -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("You are terse."),
        ChatMessage::user("Name one book."),
    ]
}

// ============= Tests =============

#[tokio::test]
async fn test_string_result_is_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(RUN_PATH))
        .and(header("authorization", "Bearer secret-token"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system", "content": "You are terse." },
                { "role": "user", "content": "Name one book." }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!("Dune"))))
        .expect(1)
        .mount(&server)
        .await;

    let output = client_for(&server).chat(&conversation()).await.unwrap();
    assert_eq!(output, InferenceOutput::Text("Dune".to_string()));
}

#[tokio::test]
async fn test_object_result_is_structured() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(RUN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!({ "response": "Dune", "usage": { "total_tokens": 12 } }))),
        )
        .mount(&server)
        .await;

    let output = client_for(&server).chat(&conversation()).await.unwrap();
    match &output {
        InferenceOutput::Structured(value) => assert_eq!(value["response"], "Dune"),
        other => panic!("Expected structured output, got {:?}", other),
    }

    let text = output.into_text();
    assert!(text.starts_with('{'));
    assert!(text.contains("\"response\":\"Dune\""));
}

#[tokio::test]
async fn test_generate_with_system_flattens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(RUN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!("Dune"))))
        .mount(&server)
        .await;

    let text = client_for(&server)
        .generate_with_system("You are terse.", "Name one book.")
        .await
        .unwrap();
    assert_eq!(text, "Dune");
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_llm_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(RUN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "errors": [{ "code": 5006, "message": "Invalid input" }],
            "result": null
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).chat(&conversation()).await.unwrap_err();
    match err {
        AppError::LLM(msg) => assert!(msg.contains("Invalid input (5006)"), "{}", msg),
        other => panic!("Expected LLM error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(RUN_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server).chat(&conversation()).await.unwrap_err();
    match err {
        AppError::LLM(msg) => assert!(msg.contains("502"), "{}", msg),
        other => panic!("Expected LLM error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_result_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(RUN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "errors": []
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).chat(&conversation()).await;
    assert!(matches!(result, Err(AppError::LLM(_))));
}

#[tokio::test]
async fn test_unreachable_server() {
    let client = WorkersAiClient::new(
        "acct-123".to_string(),
        "secret-token".to_string(),
        "http://127.0.0.1:1".to_string(),
        MODEL.to_string(),
    )
    .unwrap();

    let result = client.chat(&conversation()).await;
    assert!(matches!(result, Err(AppError::LLM(_))));
}
