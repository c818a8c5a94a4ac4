//! Integration tests for recipient, group and application management.

mod helpers;

use axum::http::StatusCode;
use helpers::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_management_requires_session() {
    let app = TestApp::new().await;

    for path in ["/api/recipients", "/api/groups", "/api/applications"] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{path}");
    }
}

#[tokio::test]
async fn test_recipient_crud() {
    let app = TestApp::new().await;
    let token = app.login("pm1@company.com").await;

    let list = app.request("GET", "/api/recipients", None, Some(&token)).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body.as_array().expect("array").len(), 6);

    let created = app
        .request(
            "POST",
            "/api/recipients",
            Some(json!({
                "name": "Design Team",
                "email": "Design@Company.com",
                "role": "Design",
                "groupId": 2,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{}", created.body);
    assert_eq!(created.body["email"], "design@company.com");
    assert_eq!(created.body["groupId"], 2);
    let id = created.body["id"].as_i64().expect("id");
    assert_eq!(id, 7);

    let updated = app
        .request(
            "PUT",
            &format!("/api/recipients/{id}"),
            Some(json!({ "role": "Product Design", "groupId": null })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["role"], "Product Design");
    assert_eq!(updated.body["name"], "Design Team");
    assert!(updated.body["groupId"].is_null());

    let deleted = app
        .request("DELETE", &format!("/api/recipients/{id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["success"], true);
    assert_eq!(deleted.body["deleted"]["email"], "design@company.com");

    let again = app
        .request("DELETE", &format!("/api/recipients/{id}"), None, Some(&token))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.body["message"], "Recipient not found");
}

#[tokio::test]
async fn test_recipient_validation_and_conflicts() {
    let app = TestApp::new().await;
    let token = app.login("pm1@company.com").await;

    let response = app
        .request(
            "POST",
            "/api/recipients",
            Some(json!({ "name": "Nameless", "email": "" , "role": "" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Name, email, and role are required");

    let response = app
        .request(
            "POST",
            "/api/recipients",
            Some(json!({ "name": "Bad", "email": "not-an-email", "role": "QA" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid email address");

    let response = app
        .request(
            "POST",
            "/api/recipients",
            Some(json!({ "name": "Dup", "email": "QA-Team@company.com", "role": "QA" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
    assert_eq!(response.body["message"], "Email already exists");

    let response = app
        .request(
            "PUT",
            "/api/recipients/1",
            Some(json!({ "email": "qa-team@company.com" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request(
            "POST",
            "/api/recipients",
            Some(json!({ "name": "Orphan", "email": "orphan@company.com", "role": "QA", "groupId": 42 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Group 42 does not exist");
}

#[tokio::test]
async fn test_group_listing_includes_counts_and_applications() {
    let app = TestApp::new().await;
    let token = app.login("pm1@company.com").await;

    let response = app.request("GET", "/api/groups", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let groups = response.body.as_array().expect("array");
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0]["name"], "Engineering");
    assert_eq!(groups[0]["userCount"], 6);
    let apps: Vec<&str> = groups[0]["applications"]
        .as_array()
        .expect("applications")
        .iter()
        .map(|a| a["name"].as_str().expect("name"))
        .collect();
    assert_eq!(apps, vec!["CRM Dashboard", "Analytics Platform"]);
    assert_eq!(groups[2]["name"], "Support");
    assert_eq!(groups[2]["userCount"], 3);
}

#[tokio::test]
async fn test_group_create_update_delete() {
    let app = TestApp::new().await;
    let token = app.login("pm1@company.com").await;

    let response = app
        .request("POST", "/api/groups", Some(json!({ "name": "  " })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Group name is required");

    let response = app
        .request(
            "POST",
            "/api/groups",
            Some(json!({ "name": "Ops", "color": "teal" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let created = app
        .request("POST", "/api/groups", Some(json!({ "name": "Ops" })), Some(&token))
        .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["color"], "#6c757d");
    assert_eq!(created.body["description"], "");
    let id = created.body["id"].as_i64().expect("id");

    let updated = app
        .request(
            "PUT",
            &format!("/api/groups/{id}"),
            Some(json!({ "applicationIds": [3], "color": "#ff8800" })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["name"], "Ops");
    assert_eq!(updated.body["color"], "#ff8800");
    assert_eq!(updated.body["applicationIds"], json!([3]));

    let missing = app
        .request("PUT", "/api/groups/404", Some(json!({ "name": "x" })), Some(&token))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["message"], "Group not found");
}

#[tokio::test]
async fn test_group_delete_unassigns_recipients() {
    let app = TestApp::new().await;
    let token = app.login("pm1@company.com").await;

    let deleted = app
        .request("DELETE", "/api/groups/3", None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["deleted"]["name"], "Support");

    let recipients = app.request("GET", "/api/recipients", None, Some(&token)).await;
    let support = recipients
        .body
        .as_array()
        .expect("array")
        .iter()
        .find(|r| r["id"] == 5)
        .expect("support recipient")
        .clone();
    assert!(support["groupId"].is_null());
}

#[tokio::test]
async fn test_application_registry() {
    let app = TestApp::new().await;
    let token = app.login("pm1@company.com").await;

    let list = app.request("GET", "/api/applications", None, Some(&token)).await;
    assert_eq!(list.status, StatusCode::OK);
    let apps = list.body.as_array().expect("array");
    assert_eq!(apps.len(), 3);
    assert_eq!(apps[0]["hasApiKey"], true);
    assert!(apps[0].get("apiKey").is_none());

    let response = app
        .request(
            "POST",
            "/api/applications",
            Some(json!({ "name": "Wiki" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Name and baseUrl are required");

    let created = app
        .request(
            "POST",
            "/api/applications",
            Some(json!({ "name": "Wiki", "baseUrl": "http://localhost:4004" })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{}", created.body);
    assert_eq!(created.body["status"], "active");
    assert_eq!(created.body["notificationEndpoint"], "");
    assert_eq!(created.body["hasApiKey"], false);
    let id = created.body["id"].as_i64().expect("id");

    let updated = app
        .request(
            "PUT",
            &format!("/api/applications/{id}"),
            Some(json!({ "status": "maintenance", "apiKey": "wiki-key" })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["status"], "maintenance");
    assert_eq!(updated.body["hasApiKey"], true);

    let invalid = app
        .request(
            "PUT",
            &format!("/api/applications/{id}"),
            Some(json!({ "status": "retired" })),
            Some(&token),
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.body["message"], "Invalid application status: retired");

    let deleted = app
        .request("DELETE", &format!("/api/applications/{id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["deleted"]["name"], "Wiki");

    // Groups keep their entitlements to removed applications.
    let groups = app.request("GET", "/api/groups", None, Some(&token)).await;
    assert_eq!(groups.status, StatusCode::OK);
}
