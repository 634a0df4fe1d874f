//! Integration tests for the completion client against a mock HTTP API.

use anyhow::Result;
use git_scribe::ai::{CompletionClient, CompletionError, PromptDocument};
use git_scribe::cli::generate::{resolve_message, MessageResolution};
use git_scribe::git::RepositoryState;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_prompt() -> PromptDocument {
    let state = RepositoryState {
        diff: "+def handle_request():\n+    pass\n".to_string(),
        staged_files: vec!["a.py".to_string()],
        branch: "feature-x".to_string(),
        recent_subjects: vec!["Add request router".to_string()],
    };
    PromptDocument::assemble(&state, None)
}

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn returns_trimmed_first_choice() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({"model": "gpt-4o", "stream": false})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("  Add `handle_request` stub\n")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = CompletionClient::new("gpt-4o", "sk-test", server.uri());
    let message = client.complete(&sample_prompt()).await?;

    assert_eq!(message, "Add `handle_request` stub");

    Ok(())
}

#[tokio::test]
async fn http_error_is_reported_with_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = CompletionClient::new("gpt-4o", "sk-test", server.uri());
    let error = client
        .complete(&sample_prompt())
        .await
        .expect_err("500 must surface as an error");

    match error {
        CompletionError::RequestFailed { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("upstream exploded"));
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_choices_are_an_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = CompletionClient::new("gpt-4o", "sk-test", server.uri());
    let error = client
        .complete(&sample_prompt())
        .await
        .expect_err("empty choices must surface as an error");

    assert!(matches!(error, CompletionError::InvalidResponse(_)));
}

#[tokio::test]
async fn sentinel_response_resolves_to_declined() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body(git_scribe::ai::INSUFFICIENT_CONTEXT_SENTINEL)),
        )
        .mount(&server)
        .await;

    let client = CompletionClient::new("gpt-4o", "sk-test", server.uri());
    let message = client.complete(&sample_prompt()).await?;

    assert_eq!(
        resolve_message(Some(message), true),
        MessageResolution::Declined
    );

    Ok(())
}

#[tokio::test]
async fn missing_credential_fails_before_any_network_attempt() -> Result<()> {
    let server = MockServer::start().await;

    // Point the settings fallback at an empty home so only the process
    // environment matters.
    let empty_home = tempfile::tempdir()?;
    std::env::set_var("HOME", empty_home.path());
    std::env::remove_var("OPENAI_API_KEY");
    std::env::remove_var("OPENAI_AUTH_TOKEN");

    let error = CompletionClient::from_env(None).expect_err("missing key must fail");
    assert!(matches!(error, CompletionError::ApiKeyNotFound));

    // No request was ever issued.
    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());

    Ok(())
}
