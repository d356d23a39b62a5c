//! Gateway behaviour against a mocked chat completion server.

use std::time::Duration;

use pdfqa_core::{
    LanguageModel,
    llm::{LLMRequest, Message, Parameters},
};
use pdfqa_openai::{OpenAI, OpenAIError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenAI {
    OpenAI::builder("test-key")
        .base_url(server.uri())
        .model("llama3-8b-8192")
        .build()
}

fn conversation() -> LLMRequest {
    LLMRequest::new([
        Message::system("The following is the content of a PDF file:\n\n--- Page 1 ---\nAlpha"),
        Message::user("What is on page 1?"),
    ])
}

#[tokio::test]
async fn posts_messages_and_returns_first_choice() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "llama3-8b-8192",
            "stream": false,
            "messages": [
                {"role": "system", "content": "The following is the content of a PDF file:\n\n--- Page 1 ---\nAlpha"},
                {"role": "user", "content": "What is on page 1?"},
            ],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Alpha."},
                "finish_reason": "stop",
            }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server).respond(conversation()).await.unwrap();
    assert_eq!(reply, "Alpha.");
}

#[tokio::test]
async fn forwards_sampling_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"temperature": 0.25, "max_tokens": 64})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "ok"}}],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request =
        conversation().with_parameters(Parameters::default().temperature(0.25).max_tokens(64));
    let reply = client_for(&server).respond(request).await.unwrap();
    assert_eq!(reply, "ok");
}

#[tokio::test]
async fn surfaces_upstream_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Invalid API Key", "type": "invalid_request_error"},
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .respond(conversation())
        .await
        .unwrap_err();
    match err {
        OpenAIError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid API Key");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn empty_choices_are_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .respond(conversation())
        .await
        .unwrap_err();
    assert!(matches!(err, OpenAIError::EmptyResponse));
}

#[tokio::test]
async fn malformed_body_is_a_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .respond(conversation())
        .await
        .unwrap_err();
    assert!(matches!(err, OpenAIError::Json(_)));
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"choices": [{"message": {"content": "late"}}]}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .with_timeout(Duration::from_millis(100))
        .respond(conversation())
        .await
        .unwrap_err();
    assert!(matches!(err, OpenAIError::Timeout));
}
