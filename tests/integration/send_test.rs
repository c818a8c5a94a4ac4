//! Integration tests for direct sends and bulk fan-out to applications.

mod helpers;

use axum::http::StatusCode;
use helpers::{TestApp, UNREACHABLE, spawn_receiver};
use serde_json::json;

#[tokio::test]
async fn test_send_to_recipients() {
    let app = TestApp::new().await;
    let token = app.login("pm1@company.com").await;
    let id = app.create_draft(&token, "Direct").await;

    let response = app
        .request(
            "POST",
            &format!("/api/notifications/{id}/send"),
            Some(json!({ "recipientIds": [2, 5, 404] })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["message"], "Release notes sent to 2 recipients");
    let record = &response.body["sentRelease"];
    assert_eq!(record["kind"], "direct");
    assert_eq!(record["notificationId"], id);
    assert_eq!(record["sentBy"], "pm1@company.com");
    assert_eq!(record["recipients"].as_array().expect("recipients").len(), 2);
    assert!(record["tracking"].is_null());

    let notification = app
        .request("GET", &format!("/api/notifications/{id}"), None, Some(&token))
        .await;
    assert_eq!(notification.body["status"], "sent");
    assert_eq!(notification.body["sentTo"][1]["email"], "support-team@company.com");
}

#[tokio::test]
async fn test_send_requires_recipients() {
    let app = TestApp::new().await;
    let token = app.login("pm1@company.com").await;
    let id = app.create_draft(&token, "Direct").await;
    let path = format!("/api/notifications/{id}/send");

    let response = app
        .request("POST", &path, Some(json!({ "recipientIds": [] })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Please select at least one recipient");

    let response = app
        .request("POST", &path, Some(json!({ "recipientIds": [404] })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "No valid recipients selected");
}

#[tokio::test]
async fn test_bulk_send_dispatches_to_each_application() {
    let app = TestApp::new().await;
    let (crm_url, crm_received) = spawn_receiver(StatusCode::OK).await;
    let (analytics_url, analytics_received) = spawn_receiver(StatusCode::OK).await;
    app.point_application(1, &crm_url);
    app.point_application(2, &analytics_url);

    let token = app.login("pm1@company.com").await;
    let id = app.create_draft(&token, "Bulk release").await;

    let response = app
        .request(
            "POST",
            &format!("/api/notifications/{id}/send-bulk"),
            Some(json!({ "groupIds": [1], "applicationIds": [1, 2] })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(
        response.body["message"],
        "Notification sent to 6 users across 2 application(s)"
    );
    let summary = &response.body["summary"];
    assert_eq!(summary["totalApplications"], 2);
    assert_eq!(summary["successfulApplications"], 2);
    assert_eq!(summary["failedApplications"], 0);
    assert_eq!(summary["totalUsers"], 6);
    assert_eq!(summary["groups"][0]["name"], "Engineering");
    assert_eq!(summary["groups"][0]["userCount"], 6);

    let record = &response.body["sentRelease"];
    assert_eq!(record["kind"], "bulk");
    assert_eq!(record["totalUsers"], 6);
    assert_eq!(record["tracking"]["totalSent"], 6);
    assert_eq!(record["tracking"]["opened"], 0);

    let crm = crm_received.lock().expect("lock").clone();
    assert_eq!(crm.len(), 1);
    assert_eq!(crm[0].authorization.as_deref(), Some("Bearer crm-api-key-123"));
    assert_eq!(crm[0].source_header.as_deref(), Some("true"));
    let payload = &crm[0].body;
    assert_eq!(payload["source"], "PM_INTERFACE");
    assert_eq!(payload["notificationId"], id);
    assert_eq!(payload["title"], "Bulk release");
    assert_eq!(payload["priority"], "high");
    assert_eq!(payload["type"], "release_notes");
    assert_eq!(payload["trackingEnabled"], true);
    assert!(
        payload["trackingCallbackUrl"]
            .as_str()
            .expect("callback url")
            .ends_with("/api/notifications/track-open")
    );
    assert_eq!(payload["targetUsers"].as_array().expect("users").len(), 6);
    assert_eq!(payload["metadata"]["sentBy"], "pm1@company.com");
    assert_eq!(payload["metadata"]["applicationName"], "CRM Dashboard");
    assert_eq!(payload["metadata"]["jiraReleaseNotes"], "REL-100");

    let analytics = analytics_received.lock().expect("lock").clone();
    assert_eq!(analytics.len(), 1);
    assert_eq!(
        analytics[0].authorization.as_deref(),
        Some("Bearer analytics-api-key-456")
    );
    assert_eq!(analytics[0].body["metadata"]["applicationId"], 2);

    let notification = app
        .request("GET", &format!("/api/notifications/{id}"), None, Some(&token))
        .await;
    assert_eq!(notification.body["status"], "sent");
    assert_eq!(notification.body["sentTo"].as_array().expect("sentTo").len(), 6);
    assert_eq!(notification.body["sentVia"]["applications"][1]["name"], "Analytics Platform");
    assert_eq!(notification.body["tracking"]["totalSent"], 6);
}

#[tokio::test]
async fn test_bulk_send_records_partial_failure() {
    let app = TestApp::new().await;
    let (ok_url, _) = spawn_receiver(StatusCode::OK).await;
    let (busy_url, busy_received) = spawn_receiver(StatusCode::SERVICE_UNAVAILABLE).await;
    app.point_application(1, &ok_url);
    app.point_application(2, UNREACHABLE);
    app.point_application(3, &busy_url);

    let token = app.login("pm1@company.com").await;
    let id = app.create_draft(&token, "Partial").await;

    let response = app
        .request(
            "POST",
            &format!("/api/notifications/{id}/send-bulk"),
            Some(json!({ "groupIds": [2], "applicationIds": [1, 2, 3] })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["summary"]["successfulApplications"], 1);
    assert_eq!(response.body["summary"]["failedApplications"], 2);

    let results = response.body["results"].as_array().expect("results");
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["applicationId"], 1);
    assert_eq!(results[0]["success"], true);
    assert_eq!(results[0]["statusCode"], 200);
    assert_eq!(results[0]["userCount"], 4);

    assert_eq!(results[1]["applicationId"], 2);
    assert_eq!(results[1]["success"], false);
    assert!(results[1].get("statusCode").is_none());
    assert!(results[1]["error"].is_string());

    assert_eq!(results[2]["applicationId"], 3);
    assert_eq!(results[2]["success"], false);
    assert_eq!(results[2]["statusCode"], 503);
    assert_eq!(busy_received.lock().expect("lock").len(), 1);

    // The record keeps every result, failures included.
    assert_eq!(
        response.body["sentRelease"]["results"]
            .as_array()
            .expect("stored results")
            .len(),
        3
    );
}

#[tokio::test]
async fn test_bulk_send_dedupes_users_across_groups() {
    let app = TestApp::new().await;
    let (url, received) = spawn_receiver(StatusCode::OK).await;
    app.point_application(1, &url);
    let token = app.login("pm1@company.com").await;

    let response = app
        .request(
            "POST",
            "/api/groups",
            Some(json!({
                "name": "Release Champions",
                "users": [
                    { "userId": 1, "name": "John Doe", "email": "john.doe@company.com" },
                    { "userId": 99, "name": "Guest Reviewer", "email": "guest@partner.com" },
                ],
                "applicationIds": [1],
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let champions = response.body["id"].as_i64().expect("group id");

    let id = app.create_draft(&token, "Overlap").await;
    let response = app
        .request(
            "POST",
            &format!("/api/notifications/{id}/send-bulk"),
            Some(json!({ "groupIds": [1, champions], "applicationIds": [1] })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["summary"]["totalUsers"], 7);
    let delivered = received.lock().expect("lock").clone();
    let users = delivered[0].body["targetUsers"].as_array().expect("users").clone();
    assert_eq!(users.len(), 7);
    let john = users
        .iter()
        .filter(|u| u["userId"] == 1)
        .count();
    assert_eq!(john, 1);
}

#[tokio::test]
async fn test_bulk_send_validation() {
    let app = TestApp::new().await;
    let token = app.login("pm1@company.com").await;
    let id = app.create_draft(&token, "Invalid").await;
    let path = format!("/api/notifications/{id}/send-bulk");

    let cases = [
        (json!({ "groupIds": [], "applicationIds": [1] }), "Please select at least one group"),
        (
            json!({ "groupIds": [1], "applicationIds": [] }),
            "Please select at least one application",
        ),
        (
            json!({ "groupIds": [404], "applicationIds": [1] }),
            "No users found in selected groups",
        ),
        (
            json!({ "groupIds": [1], "applicationIds": [404] }),
            "No valid applications selected",
        ),
    ];

    for (body, message) in cases {
        let response = app.request("POST", &path, Some(body), Some(&token)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["message"], message);
    }

    // Nothing was sent.
    let notification = app
        .request("GET", &format!("/api/notifications/{id}"), None, Some(&token))
        .await;
    assert_eq!(notification.body["status"], "draft");
}

#[tokio::test]
async fn test_send_other_users_notification_is_not_found() {
    let app = TestApp::new().await;
    let pm1 = app.login("pm1@company.com").await;
    let pm2 = app.login("pm2@company.com").await;
    let id = app.create_draft(&pm1, "Owned").await;

    let response = app
        .request(
            "POST",
            &format!("/api/notifications/{id}/send-bulk"),
            Some(json!({ "groupIds": [1], "applicationIds": [1] })),
            Some(&pm2),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
