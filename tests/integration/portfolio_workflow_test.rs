//! End-to-end portfolio flows against Postgres
//!
//! Run with a migrated database:
//! `TEST_DATABASE_URL=postgres://... cargo test -p portfolio-integration-tests -- --ignored --test-threads=1`

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;

use common::{error_code, TestApp};

fn project_body(manager_id: &str, staff_ids: &[&str]) -> Value {
    json!({
        "name": "Apollo",
        "start_date": "2024-01-01",
        "expected_end_date": "2024-03-01",
        "total_budget": "50000.00",
        "description": "Moonshot",
        "manager_id": manager_id,
        "staff_ids": staff_ids,
    })
}

async fn create_project(app: &TestApp, manager: &str, staff: &[&str]) -> String {
    let (status, body) = app.post("/v1/projects", project_body(manager, staff)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().expect("project id").to_string()
}

async fn set_status(app: &TestApp, id: &str, status: &str) -> (StatusCode, Value) {
    app.patch(
        &format!("/v1/projects/{id}/status"),
        json!({ "status": status }),
    )
    .await
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_member_registry_flow() {
    let app = TestApp::new().await.unwrap();

    let id = app.member("Grace", "manager").await;
    let (status, body) = app.get(&format!("/v1/members/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "manager");

    let (status, body) = app
        .post("/v1/members", json!({ "name": "Grace", "role": "MANAGER" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    app.member("Grace", "staff").await;
    let (_, body) = app.get("/v1/members?role=staff").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_project_lifecycle_flow() {
    let app = TestApp::new().await.unwrap();
    let manager = app.member("Margaret", "manager").await;
    let staff = app.member("Sam", "staff").await;

    let (status, body) = app
        .post("/v1/projects", project_body(&manager, &[&staff]))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["status"], "UNDER_REVIEW");
    assert_eq!(body["risk_classification"], "LOW");
    assert_eq!(body["manager_name"], "Margaret");
    let id = body["id"].as_str().unwrap().to_string();

    // Skipping ahead is rejected and leaves the status alone
    let (status, _) = set_status(&app, &id, "IN_PROGRESS").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for next in [
        "REVIEW_COMPLETED",
        "REVIEW_APPROVED",
        "STARTED",
        "PLANNED",
        "IN_PROGRESS",
    ] {
        let (status, body) = set_status(&app, &id, next).await;
        assert_eq!(status, StatusCode::OK, "{next}: {body}");
        assert_eq!(body["status"], next);
    }

    // In progress: cannot be deleted
    let (status, _) = app.delete(&format!("/v1/projects/{id}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = set_status(&app, &id, "COMPLETED").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["actual_end_date"].is_string());

    let (status, body) = app.get(&format!("/v1/projects/{id}/risk")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk_label"], "Low risk");

    let (status, body) = app.get("/v1/reports/portfolio").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["projects_by_status"]["COMPLETED"], 1);
    assert_eq!(body["unique_staff_count"], 1);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_staff_capacity_is_enforced() {
    let app = TestApp::new().await.unwrap();
    let manager = app.member("Margaret", "manager").await;
    let staff = app.member("Sam", "staff").await;

    for _ in 0..3 {
        create_project(&app, &manager, &[&staff]).await;
    }

    let (status, body) = app
        .post("/v1/projects", project_body(&manager, &[&staff]))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");

    // Finishing one frees a slot
    let (_, page) = app.get("/v1/projects").await;
    let first = page["items"][0]["id"].as_str().unwrap().to_string();
    let (status, _) = set_status(&app, &first, "CANCELLED").await;
    assert_eq!(status, StatusCode::OK);
    create_project(&app, &manager, &[&staff]).await;
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_update_and_delete() {
    let app = TestApp::new().await.unwrap();
    let manager = app.member("Margaret", "manager").await;
    let staff = app.member("Sam", "staff").await;
    let id = create_project(&app, &manager, &[&staff]).await;

    let mut update = project_body(&manager, &[&staff]);
    update["total_budget"] = json!("750000.00");
    update["name"] = json!("Apollo II");
    let (status, body) = app.put(&format!("/v1/projects/{id}"), update).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["risk_classification"], "HIGH");
    assert_eq!(body["name"], "Apollo II");

    let (_, page) = app.get("/v1/projects?name=apollo%20ii").await;
    assert_eq!(page["total"], 1);

    let (status, _) = app.delete(&format!("/v1/projects/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.get(&format!("/v1/projects/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");
}
