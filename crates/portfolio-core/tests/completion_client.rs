use std::sync::Arc;

use portfolio_core::{
    CompletionClient, CompletionError, CompletionSettings, Message, Persona, Role, RoleEntry,
    Sender, WidgetController,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS: &str = "/v1/chat/completions";

fn settings() -> CompletionSettings {
    CompletionSettings {
        model: "gpt-4o-mini".to_string(),
        temperature: 0.5,
    }
}

fn client(server: &MockServer) -> CompletionClient {
    CompletionClient::new(&format!("{}{}", server.uri(), COMPLETIONS), settings())
}

fn reply(content: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    }))
}

#[tokio::test]
async fn test_query_sends_model_temperature_and_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .and(body_json(json!({
            "model": "gpt-4o-mini",
            "temperature": 0.5,
            "messages": [
                { "role": "system", "content": "persona" },
                { "role": "user", "content": "Hello" }
            ]
        })))
        .respond_with(reply(json!("Hi there")))
        .expect(1)
        .mount(&server)
        .await;

    let messages = vec![
        RoleEntry::new(Role::System, "persona"),
        RoleEntry::new(Role::User, "Hello"),
    ];
    let text = client(&server).query(&messages).await.unwrap();
    assert_eq!(text, "Hi there");
}

#[tokio::test]
async fn test_no_authorization_header_without_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .respond_with(reply(json!("ok")))
        .mount(&server)
        .await;

    client(&server)
        .query(&[RoleEntry::new(Role::User, "x")])
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_api_key_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(reply(json!("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let text = client(&server)
        .with_api_key("sk-test")
        .query(&[RoleEntry::new(Role::User, "x")])
        .await
        .unwrap();
    assert_eq!(text, "ok");
}

#[tokio::test]
async fn test_empty_content_is_empty_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(reply(json!("")))
        .mount(&server)
        .await;

    let err = client(&server)
        .query(&[RoleEntry::new(Role::User, "x")])
        .await
        .unwrap_err();
    assert_eq!(err, CompletionError::EmptyCompletion);
}

#[tokio::test]
async fn test_non_success_uses_upstream_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "Rate limit reached", "type": "requests" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .query(&[RoleEntry::new(Role::User, "x")])
        .await
        .unwrap_err();
    assert_eq!(err, CompletionError::Transport("Rate limit reached".to_string()));
}

#[tokio::test]
async fn test_unexpected_shape_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "hi" })))
        .mount(&server)
        .await;

    let err = client(&server)
        .query(&[RoleEntry::new(Role::User, "x")])
        .await
        .unwrap_err();
    assert!(matches!(err, CompletionError::Transport(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let server = MockServer::start().await;
    let endpoint = format!("{}{}", server.uri(), COMPLETIONS);
    drop(server);

    let err = CompletionClient::new(&endpoint, settings())
        .query(&[RoleEntry::new(Role::User, "x")])
        .await
        .unwrap_err();
    assert!(matches!(err, CompletionError::Transport(ref m) if !m.is_empty()));
}

#[tokio::test]
async fn test_widget_scenario_against_http_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .respond_with(reply(json!("Hi there")))
        .expect(1)
        .mount(&server)
        .await;

    let mut widget = WidgetController::new(
        Persona {
            instructions: "persona".to_string(),
            greeting: "Olá!".to_string(),
        },
        Arc::new(client(&server)),
    );

    widget.toggle();
    assert_eq!(widget.conversation().len(), 1);

    widget.set_draft_input("Hello");
    assert!(widget.send().await);

    let transcript: Vec<(Sender, &str)> = widget
        .conversation()
        .all()
        .map(|m| (m.sender(), m.text()))
        .collect();
    assert_eq!(
        transcript,
        vec![
            (Sender::Assistant, "Olá!"),
            (Sender::User, "Hello"),
            (Sender::Assistant, "Hi there"),
        ]
    );

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body["messages"],
        json!([
            { "role": "system", "content": "persona" },
            { "role": "assistant", "content": "Olá!" },
            { "role": "user", "content": "Hello" }
        ])
    );
}

#[tokio::test]
async fn test_widget_failure_keeps_user_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let mut widget = WidgetController::new(
        Persona {
            instructions: "persona".to_string(),
            greeting: "Olá!".to_string(),
        },
        Arc::new(client(&server)),
    );
    widget.set_draft_input("Hello");
    widget.send().await;

    let texts: Vec<&str> = widget.conversation().all().map(Message::text).collect();
    assert_eq!(texts, vec!["Hello", "Erro: API error 500 Internal Server Error"]);
}
