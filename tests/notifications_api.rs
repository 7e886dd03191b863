//! Message notification API tests

#![cfg(feature = "ssr")]

mod common;

use axum::http::StatusCode;
use common::{TestApp, TestUser};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn notification(recipient: &TestUser, message_id: &str, text: &str) -> Value {
    json!({
        "recipientId": recipient.id.to_string(),
        "messageId": message_id,
        "channelId": "channel-42",
        "messageText": text,
    })
}

#[tokio::test]
async fn test_create_twice_then_mark_read() {
    let app = TestApp::new();
    let sender = app.onboarded_user("Sam").await;
    let recipient = app.onboarded_user("Rita").await;

    let first = app
        .post("/api/users/message-notification", &sender, notification(&recipient, "m1", "hi"))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["isRead"], false);
    assert_eq!(first.body["sender"], sender.id.to_string());
    assert_eq!(first.body["messageText"], "hi");

    let second = app
        .post("/api/users/message-notification", &sender, notification(&recipient, "m1", "hi"))
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["id"], first.body["id"]);
    assert_eq!(app.store.notification_count().await, 1);

    let unread = app.get("/api/users/message-notifications", &recipient).await;
    assert_eq!(unread.status, StatusCode::OK);
    let unread = unread.body.as_array().unwrap().clone();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0]["sender"]["id"], sender.id.to_string());
    assert_eq!(unread[0]["sender"]["fullName"], "Sam");

    let marked = app.put("/api/users/message-notifications/read", &recipient).await;
    assert_eq!(marked.status, StatusCode::OK);
    assert_eq!(marked.body, json!({ "message": "Notifications marked as read" }));

    let unread = app.get("/api/users/message-notifications", &recipient).await;
    assert_eq!(unread.body, json!([]));
}

#[tokio::test]
async fn test_self_notification_rejected() {
    let app = TestApp::new();
    let sam = app.onboarded_user("Sam").await;

    let response = app
        .post("/api/users/message-notification", &sam, notification(&sam, "m1", "note"))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Cannot create notification for self");
    assert_eq!(app.store.notification_count().await, 0);
}

#[tokio::test]
async fn test_missing_fields_rejected() {
    let app = TestApp::new();
    let sam = app.onboarded_user("Sam").await;
    let rita = app.onboarded_user("Rita").await;

    let response = app
        .post(
            "/api/users/message-notification",
            &sam,
            json!({ "recipientId": rita.id.to_string(), "messageText": "hi" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.notification_count().await, 0);

    let response = app
        .post(
            "/api/users/message-notification",
            &sam,
            notification(&rita, "m1", ""),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "recipientId, messageId, channelId and messageText are required"
    );
    assert_eq!(app.store.notification_count().await, 0);
}

#[tokio::test]
async fn test_mistyped_body_gets_json_error() {
    let app = TestApp::new();
    let sam = app.onboarded_user("Sam").await;

    let response = app
        .post(
            "/api/users/message-notification",
            &sam,
            json!({ "recipientId": 5, "messageId": "m1" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["status"], 400);
    assert!(response.body["message"].is_string());
    assert_eq!(app.store.notification_count().await, 0);
}

#[tokio::test]
async fn test_unread_count_combines_requests_and_notifications() {
    let app = TestApp::new();
    let rita = app.onboarded_user("Rita").await;
    let sam = app.onboarded_user("Sam").await;
    let tom = app.onboarded_user("Tom").await;

    let count = app.get("/api/users/notifications/unread-count", &rita).await;
    assert_eq!(count.body, json!({ "count": 0 }));

    // Two pending requests to Rita, one of which gets accepted.
    let from_sam = app
        .post(&format!("/api/users/friend-request/{}", rita.id), &sam, Value::Null)
        .await;
    app.post(&format!("/api/users/friend-request/{}", rita.id), &tom, Value::Null)
        .await;
    for message_id in ["m1", "m2", "m3"] {
        app.post("/api/users/message-notification", &sam, notification(&rita, message_id, "yo"))
            .await;
    }

    let count = app.get("/api/users/notifications/unread-count", &rita).await;
    assert_eq!(count.status, StatusCode::OK);
    assert_eq!(count.body, json!({ "count": 5 }));

    let request_id = from_sam.body["id"].as_str().unwrap().to_string();
    app.put(&format!("/api/users/friend-request/{}/accept", request_id), &rita)
        .await;
    app.put("/api/users/message-notifications/read", &rita).await;

    let count = app.get("/api/users/notifications/unread-count", &rita).await;
    assert_eq!(count.body, json!({ "count": 1 }));

    let sam_count = app.get("/api/users/notifications/unread-count", &sam).await;
    assert_eq!(sam_count.body, json!({ "count": 0 }));
}

#[tokio::test]
async fn test_notification_routes_require_authentication() {
    let app = TestApp::new();
    let response = app
        .request(
            axum::http::Method::GET,
            "/api/users/notifications/unread-count",
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
