mod common;

use common::*;
use serde_json::json;

/// Test malformed payloads never surface as HTTP errors
#[tokio::test]
async fn test_malformed_json_is_acknowledged() {
    let app = TestApp::new();

    for payload in ["", "   ", "{ invalid json }", "{\"entry\":"] {
        app.post_webhook_raw(payload)
            .await
            .assert_ack("INTERNAL_SERVER_ERROR");
    }
}

/// Test a body over the size limit is acknowledged like unreadable JSON
#[tokio::test]
async fn test_oversized_body_is_acknowledged() {
    let app = TestApp::new();

    let response = app.post_webhook_raw(vec![b'a'; 3 * 1024 * 1024]).await;

    response.assert_ack("INTERNAL_SERVER_ERROR");
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
}

/// Test deliveries without a text message
#[tokio::test]
async fn test_non_text_events() {
    let app = TestApp::new();

    let payloads = vec![
        json!({}),
        json!({ "entry": [] }),
        json!({ "entry": [{ "changes": [{ "value": { "statuses": [{ "status": "delivered" }] } }] }] }),
        TestData::envelope(json!({ "type": "image", "from": "5511987654321", "image": { "id": "1" } })),
        TestData::envelope(json!({ "type": "reaction", "from": "5511987654321" })),
        json!({ "entry": "not-an-array" }),
    ];

    for payload in payloads {
        let response = app.post_json("/webhook", payload.clone()).await;
        assert_eq!(
            response.text(),
            "EVENT_RECEIVED_NOT_TEXT",
            "payload {payload} should be ignored"
        );
        assert_eq!(response.status, axum::http::StatusCode::OK);
    }
}

/// Test text messages missing a sender or body
#[tokio::test]
async fn test_incomplete_text_messages() {
    let app = TestApp::new();

    let payloads = vec![
        TestData::envelope(json!({ "type": "text", "text": { "body": "/expense 1 x" } })),
        TestData::envelope(json!({ "type": "text", "from": "", "text": { "body": "/expense 1 x" } })),
        TestData::envelope(json!({ "type": "text", "from": "5511987654321" })),
        TestData::envelope(json!({ "type": "text", "from": "5511987654321", "text": { "body": " \t " } })),
    ];

    for payload in payloads {
        app.post_json("/webhook", payload)
            .await
            .assert_ack("EVENT_RECEIVED_INVALID_DATA");
    }
}

/// Test webhook responses carry CORS headers
#[tokio::test]
async fn test_acknowledgments_carry_cors_headers() {
    let app = TestApp::new();

    let response = app.post_json("/webhook", json!({})).await;

    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
}

/// Test a number is matched exactly, without normalization
#[tokio::test]
async fn test_phone_lookup_is_exact() {
    let app = TestApp::new();
    let phone = TestData::unique_phone();
    let account = app.account(Some(&phone)).await;

    app.deliver_text(&format!("+{phone}"), "/expense 5 Snack")
        .await
        .assert_ack("USER_NOT_FOUND_OR_LINKED");
    assert!(app.transactions(account.id).await.is_empty());
}

/// Test only the first message of the envelope is processed
#[tokio::test]
async fn test_only_first_message_is_processed() {
    let app = TestApp::new();
    let phone = TestData::unique_phone();
    let account = app.account(Some(&phone)).await;

    let payload = json!({
        "entry": [{ "changes": [{ "value": { "messages": [
            { "type": "text", "from": phone, "text": { "body": "/expense 1 First" } },
            { "type": "text", "from": phone, "text": { "body": "/expense 2 Second" } }
        ] } }] }]
    });
    app.post_json("/webhook", payload)
        .await
        .assert_ack("EVENT_RECEIVED");

    let transactions = app.transactions(account.id).await;
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].description, "First");
}
