//! Integration tests for the live notification stream.

mod helpers;

use axum::http::StatusCode;
use helpers::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_stream_requires_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/events", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_stream_opens_with_greeting_only_when_backlog_empty() {
    let app = TestApp::new().await;
    let token = app.login("pm2@company.com").await;

    let (status, mut events) = app.open_events(&token).await;
    assert_eq!(status, StatusCode::OK);

    let first = events.next_event().await;
    assert_eq!(first["type"], "connected");

    // No backlog: the next event is the live push.
    app.request(
        "POST",
        "/api/notifications/webhook/notification",
        Some(json!({
            "targetEmail": "pm2@company.com",
            "title": "Hotfix 3.0.1",
            "content": "<p>Patch</p>",
        })),
        None,
    )
    .await;
    let pushed = events.next_event().await;
    assert_eq!(pushed["type"], "notification");
    assert_eq!(pushed["data"]["title"], "Hotfix 3.0.1");
}

#[tokio::test]
async fn test_stream_sends_backlog_then_live_pushes() {
    let app = TestApp::new().await;
    let token = app.login("pm1@company.com").await;
    app.create_draft(&token, "Older").await;
    app.create_draft(&token, "Newer").await;

    let (_, mut events) = app.open_events(&token).await;
    assert_eq!(events.next_event().await["type"], "connected");

    let initial = events.next_event().await;
    assert_eq!(initial["type"], "initial");
    let backlog = initial["notifications"].as_array().expect("backlog");
    assert_eq!(backlog.len(), 2);
    assert_eq!(backlog[0]["title"], "Newer");
    assert_eq!(backlog[1]["title"], "Older");

    // Another user's notification is not pushed here.
    app.request(
        "POST",
        "/api/notifications/webhook/notification",
        Some(json!({
            "targetEmail": "pm2@company.com",
            "title": "Not for pm1",
            "content": "<p>x</p>",
        })),
        None,
    )
    .await;
    app.request(
        "POST",
        "/api/notifications/create",
        Some(json!({
            "title": "Sent live",
            "content": "<p>Live</p>",
            "recipientIds": [1],
        })),
        Some(&token),
    )
    .await;

    let pushed = events.next_event().await;
    assert_eq!(pushed["type"], "notification");
    assert_eq!(pushed["data"]["title"], "Sent live");
    assert_eq!(pushed["data"]["status"], "sent");
}

#[tokio::test]
async fn test_connected_clients_tracks_open_streams() {
    let app = TestApp::new().await;
    let token = app.login("pm1@company.com").await;

    let (_, mut events) = app.open_events(&token).await;
    events.next_event().await;

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.body["connectedClients"], 1);

    drop(events);

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.body["connectedClients"], 0);
}

#[tokio::test]
async fn test_reconnect_replaces_previous_stream() {
    let app = TestApp::new().await;
    let token = app.login("pm1@company.com").await;

    let (_, mut stale) = app.open_events(&token).await;
    stale.next_event().await;
    let (_, mut fresh) = app.open_events(&token).await;
    fresh.next_event().await;

    // Dropping the stale stream must not evict the fresh one.
    drop(stale);
    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.body["connectedClients"], 1);

    app.request(
        "POST",
        "/api/notifications/webhook/notification",
        Some(json!({
            "targetEmail": "pm1@company.com",
            "title": "After reconnect",
            "content": "<p>x</p>",
        })),
        None,
    )
    .await;
    let pushed = fresh.next_event().await;
    assert_eq!(pushed["data"]["title"], "After reconnect");
}
