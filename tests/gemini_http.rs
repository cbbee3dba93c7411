use serde_json::json;
use wesdra_assistant::{
    config::{ChatProfile, Config},
    gateway::Gateway,
    llm::GeminiClient,
    message::Message,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-3-flash-preview:generateContent";

fn config_for(server_uri: &str, api_key: &str) -> Config {
    Config {
        api_addr: format!("{}/v1beta", server_uri),
        api_key: api_key.to_string(),
        ..Config::default()
    }
}

/// Runs the blocking gateway off the async runtime that drives the mock server.
async fn reply(config: Config, text: &'static str, history: Vec<Message>) -> String {
    tokio::task::spawn_blocking(move || {
        let gateway = Gateway::new(GeminiClient::new(&config), config.profile.clone(), config.temperature);
        gateway.reply(text, &history)
    })
    .await
    .unwrap()
}

fn greeting() -> Vec<Message> {
    vec![Message::model(ChatProfile::default().greeting)]
}

#[tokio::test(flavor = "multi_thread")]
async fn successful_reply_is_returned_verbatim() {
    let server = MockServer::start().await;
    let profile = ChatProfile::default();

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [
                { "role": "model", "parts": [{ "text": profile.greeting }] },
                { "role": "user", "parts": [{ "text": "Quais são os valores da consulta?" }] }
            ],
            "system_instruction": { "parts": [{ "text": profile.system_instruction }] },
            "generation_config": { "temperature": 0.7 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "Os honorários são avaliados caso a caso, seguindo a tabela da OAB." }]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 18 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = reply(config_for(&server.uri(), "test-key"), "Quais são os valores da consulta?", greeting()).await;

    assert_eq!(text, "Os honorários são avaliados caso a caso, seguindo a tabela da OAB.");
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_yields_unavailable_sentence_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": { "code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = reply(config_for(&server.uri(), "test-key"), "Olá", greeting()).await;

    assert_eq!(text, ChatProfile::default().unavailable_fallback);
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_key_yields_unavailable_sentence() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let text = reply(config_for(&server.uri(), "wrong-key"), "Olá", greeting()).await;

    assert_eq!(text, ChatProfile::default().unavailable_fallback);
}

#[tokio::test(flavor = "multi_thread")]
async fn no_candidates_yields_whatsapp_sentence() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [],
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let text = reply(config_for(&server.uri(), "test-key"), "Olá", greeting()).await;

    assert_eq!(text, ChatProfile::default().empty_reply_fallback);
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_body_yields_unavailable_sentence() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway timeout</html>"))
        .mount(&server)
        .await;

    let text = reply(config_for(&server.uri(), "test-key"), "Olá", greeting()).await;

    assert_eq!(text, ChatProfile::default().unavailable_fallback);
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_key_never_calls_the_service() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let text = reply(config_for(&server.uri(), ""), "Olá", greeting()).await;

    assert_eq!(text, ChatProfile::default().unavailable_fallback);
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_yields_unavailable_sentence() {
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let text = reply(config_for(&uri, "test-key"), "Olá", greeting()).await;

    assert_eq!(text, ChatProfile::default().unavailable_fallback);
}
