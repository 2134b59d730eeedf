use reqwest::Url;
use serde_json::json;
use teloxide::Bot;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use homework_watchbot::notify::{Notifier, TelegramNotifier};

fn notifier_for(api_url: &str) -> TelegramNotifier {
    let bot = Bot::new("123456:TEST").set_api_url(Url::parse(api_url).unwrap());
    TelegramNotifier::new(bot, "42")
}

#[tokio::test]
async fn accepted_message_resolves_to_true() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {
                "message_id": 1,
                "date": 1700000000,
                "chat": { "id": 42, "type": "private", "first_name": "Ann" },
                "from": { "id": 7, "is_bot": true, "first_name": "watchbot" },
                "text": "hello"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(notifier_for(&server.uri()).deliver("hello").await);
}

#[tokio::test]
async fn api_error_resolves_to_false() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(!notifier_for(&server.uri()).deliver("hello").await);
}

#[tokio::test]
async fn rate_limit_resolves_to_false() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "ok": false,
            "error_code": 429,
            "description": "Too Many Requests: retry after 5",
            "parameters": { "retry_after": 5 }
        })))
        .mount(&server)
        .await;

    assert!(!notifier_for(&server.uri()).deliver("hello").await);
}

#[tokio::test]
async fn garbage_reply_resolves_to_false() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    assert!(!notifier_for(&server.uri()).deliver("hello").await);
}

#[tokio::test]
async fn network_failure_resolves_to_false() {
    assert!(!notifier_for("http://127.0.0.1:1/").deliver("hello").await);
}
