//! Integration tests for open tracking and the tracking report.

mod helpers;

use axum::http::StatusCode;
use helpers::{TestApp, spawn_receiver};
use serde_json::{Value, json};

/// Bulk-sends a fresh notification to Engineering through CRM and
/// Analytics. Returns the notification and delivery record ids.
async fn bulk_sent(app: &TestApp, token: &str) -> (i64, i64) {
    let (url, _) = spawn_receiver(StatusCode::OK).await;
    app.point_application(1, &url);
    app.point_application(2, &url);
    let id = app.create_draft(token, "Tracked release").await;
    let response = app
        .request(
            "POST",
            &format!("/api/notifications/{id}/send-bulk"),
            Some(json!({ "groupIds": [1], "applicationIds": [1, 2] })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    let delivery = response.body["sentRelease"]["id"]
        .as_i64()
        .expect("delivery id");
    (id, delivery)
}

fn open(delivery: i64, user_id: i64, app_id: i64) -> Value {
    json!({
        "deliveryRecordId": delivery,
        "userId": user_id,
        "userEmail": "john.doe@company.com",
        "userName": "John Doe",
        "applicationId": app_id,
        "applicationName": "CRM Dashboard",
    })
}

#[tokio::test]
async fn test_track_open_is_idempotent() {
    let app = TestApp::new().await;
    let token = app.login("pm1@company.com").await;
    let (id, delivery) = bulk_sent(&app, &token).await;

    let response = app
        .request("POST", "/api/notifications/track-open", Some(open(delivery, 1, 1)), None)
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["message"], "Notification open tracked successfully");
    assert_eq!(response.body["alreadyTracked"], false);
    assert_eq!(response.body["tracking"]["opened"], 1);
    assert_eq!(response.body["tracking"]["totalSent"], 6);
    assert_eq!(response.body["tracking"]["openRate"], 17);

    let response = app
        .request("POST", "/api/notifications/track-open", Some(open(delivery, 1, 2)), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Already tracked");
    assert_eq!(response.body["alreadyTracked"], true);
    assert_eq!(response.body["tracking"]["opened"], 1);

    // The notification mirrors the record's aggregate.
    let notification = app
        .request("GET", &format!("/api/notifications/{id}"), None, Some(&token))
        .await;
    assert_eq!(notification.body["tracking"]["opened"], 1);
    assert_eq!(notification.body["tracking"]["openedUsers"][0]["name"], "John Doe");
}

#[tokio::test]
async fn test_track_open_by_notification_id() {
    let app = TestApp::new().await;
    let token = app.login("pm1@company.com").await;
    let (id, _) = bulk_sent(&app, &token).await;

    let response = app
        .request(
            "POST",
            "/api/notifications/track-open",
            Some(json!({ "notificationId": id, "userId": 4, "userEmail": "sarah.w@company.com" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    let opened = &response.body["tracking"]["openedUsers"][0];
    assert_eq!(opened["userId"], 4);
    assert_eq!(opened["name"], "sarah.w@company.com");
    assert_eq!(opened["applicationName"], "Unknown");
}

#[tokio::test]
async fn test_track_open_errors() {
    let app = TestApp::new().await;
    let token = app.login("pm1@company.com").await;

    let response = app
        .request("POST", "/api/notifications/track-open", Some(json!({ "userId": 1 })), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "deliveryRecordId or notificationId, and userId are required"
    );

    let response = app
        .request(
            "POST",
            "/api/notifications/track-open",
            Some(json!({ "deliveryRecordId": 404, "userId": 1 })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Sent release record not found");

    // Direct sends carry no tracking.
    let id = app.create_draft(&token, "Direct only").await;
    let response = app
        .request(
            "POST",
            &format!("/api/notifications/{id}/send"),
            Some(json!({ "recipientIds": [1] })),
            Some(&token),
        )
        .await;
    let direct = response.body["sentRelease"]["id"].as_i64().expect("delivery id");
    let response = app
        .request("POST", "/api/notifications/track-open", Some(open(direct, 1, 1)), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "Open tracking is not enabled for this delivery"
    );

    let response = app
        .request(
            "POST",
            "/api/notifications/track-open",
            Some(json!({ "notificationId": id, "userId": 1 })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tracking_report() {
    let app = TestApp::new().await;
    let token = app.login("pm1@company.com").await;
    let (id, delivery) = bulk_sent(&app, &token).await;

    for user_id in [1, 2] {
        let response = app
            .request(
                "POST",
                "/api/notifications/track-open",
                Some(open(delivery, user_id, 1)),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let report = app
        .request("GET", &format!("/api/notifications/{id}/tracking"), None, Some(&token))
        .await;

    assert_eq!(report.status, StatusCode::OK);
    assert_eq!(report.body["notificationId"], id);
    assert_eq!(report.body["deliveryId"], delivery);
    assert_eq!(report.body["totalSent"], 6);
    assert_eq!(report.body["totalOpened"], 2);
    assert_eq!(report.body["openRate"], 33);
    assert_eq!(report.body["openedUsers"].as_array().expect("opened").len(), 2);
    assert_eq!(report.body["notOpenedUsers"].as_array().expect("not opened").len(), 4);
    assert!(report.body["lastOpenedAt"].is_string());

    let by_app = report.body["byApplication"].as_array().expect("by application");
    assert_eq!(by_app.len(), 2);
    assert_eq!(by_app[0]["applicationId"], 1);
    assert_eq!(by_app[0]["totalSent"], 6);
    assert_eq!(by_app[0]["opened"], 2);
    assert_eq!(by_app[0]["openRate"], 33);
    assert_eq!(by_app[1]["applicationId"], 2);
    assert_eq!(by_app[1]["opened"], 0);
    assert_eq!(by_app[1]["openRate"], 0);
}

#[tokio::test]
async fn test_tracking_report_never_sent_is_zeroed() {
    let app = TestApp::new().await;
    let token = app.login("pm1@company.com").await;
    let id = app.create_draft(&token, "Unsent").await;

    let report = app
        .request("GET", &format!("/api/notifications/{id}/tracking"), None, Some(&token))
        .await;

    assert_eq!(report.status, StatusCode::OK);
    assert_eq!(report.body["totalSent"], 0);
    assert_eq!(report.body["openRate"], 0);
    assert!(report.body.get("deliveryId").is_none());
    assert!(report.body["lastOpenedAt"].is_null());
}

#[tokio::test]
async fn test_tracking_report_is_owner_scoped() {
    let app = TestApp::new().await;
    let pm1 = app.login("pm1@company.com").await;
    let pm2 = app.login("pm2@company.com").await;
    let (id, _) = bulk_sent(&app, &pm1).await;

    let report = app
        .request("GET", &format!("/api/notifications/{id}/tracking"), None, Some(&pm2))
        .await;

    assert_eq!(report.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delivery_report_by_record_id() {
    let app = TestApp::new().await;
    let token = app.login("pm1@company.com").await;
    let (id, delivery) = bulk_sent(&app, &token).await;
    app.request("POST", "/api/notifications/track-open", Some(open(delivery, 3, 2)), None)
        .await;

    let report = app
        .request("GET", &format!("/api/deliveries/{delivery}/tracking"), None, Some(&token))
        .await;

    assert_eq!(report.status, StatusCode::OK);
    assert_eq!(report.body["notificationId"], id);
    assert_eq!(report.body["totalOpened"], 1);
    assert_eq!(report.body["byApplication"][1]["opened"], 1);

    let missing = app
        .request("GET", "/api/deliveries/404/tracking", None, Some(&token))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_open_on_earlier_send_leaves_mirror_on_latest() {
    let app = TestApp::new().await;
    let token = app.login("pm1@company.com").await;
    let (url, _) = spawn_receiver(StatusCode::OK).await;
    app.point_application(1, &url);
    app.point_application(2, &url);
    let id = app.create_draft(&token, "Sent twice").await;

    let mut deliveries = Vec::new();
    for group in [3, 1] {
        let response = app
            .request(
                "POST",
                &format!("/api/notifications/{id}/send-bulk"),
                Some(json!({ "groupIds": [group], "applicationIds": [1, 2] })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        deliveries.push(response.body["sentRelease"]["id"].as_i64().expect("delivery id"));
    }
    let (earlier, latest) = (deliveries[0], deliveries[1]);

    let response = app
        .request("POST", "/api/notifications/track-open", Some(open(earlier, 1, 1)), None)
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["tracking"]["opened"], 1);

    let notification = app
        .request("GET", &format!("/api/notifications/{id}"), None, Some(&token))
        .await;
    assert_eq!(notification.body["sentVia"]["deliveryId"], latest);
    assert_eq!(notification.body["tracking"]["totalSent"], 6);
    assert_eq!(notification.body["tracking"]["opened"], 0);

    let report = app
        .request("GET", &format!("/api/notifications/{id}/tracking"), None, Some(&token))
        .await;
    assert_eq!(report.body["totalSent"], 6);
    assert_eq!(report.body["totalOpened"], 0);
}

#[tokio::test]
async fn test_track_open_mistyped_user_id_gets_json_error() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/notifications/track-open",
            Some(json!({ "deliveryRecordId": 1, "userId": "u-1" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    let message = response.body["message"].as_str().expect("message");
    assert!(message.contains("userId"), "{message}");
}
