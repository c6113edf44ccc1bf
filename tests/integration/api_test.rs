//! HTTP-level tests for requests that are answered without touching the
//! database

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use uuid::Uuid;

mod common;

use common::{error_code, TestApp};

fn project_body(manager_id: Uuid, staff_ids: Vec<Uuid>) -> serde_json::Value {
    json!({
        "name": "Apollo",
        "start_date": "2024-01-01",
        "expected_end_date": "2024-03-01",
        "total_budget": "50000.00",
        "manager_id": manager_id,
        "staff_ids": staff_ids,
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::lazy();
    let (status, body) = app.get_text("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::lazy();
    let (status, _) = app.get("/v1/nothing-here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

mod members {
    use super::*;

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let app = TestApp::lazy();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/v1/members")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();

        let (status, body) = app.send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_invalid_role_is_400() {
        let app = TestApp::lazy();
        let (status, body) = app
            .post("/v1/members", json!({ "name": "Ada", "role": "director" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_blank_name_is_400() {
        let app = TestApp::lazy();
        let (status, _) = app
            .post("/v1/members", json!({ "name": "", "role": "staff" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_uuid_id_is_400() {
        let app = TestApp::lazy();
        let (status, _) = app.get("/v1/members/not-a-uuid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

mod projects {
    use super::*;

    #[tokio::test]
    async fn test_negative_budget_is_400() {
        let app = TestApp::lazy();
        let mut body = project_body(Uuid::new_v4(), vec![Uuid::new_v4()]);
        body["total_budget"] = json!("-1.00");

        let (status, body) = app.post("/v1/projects", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_budget_outside_numeric_column_is_400() {
        let app = TestApp::lazy();
        for budget in ["100000.004", "10000000000000"] {
            let mut body = project_body(Uuid::new_v4(), vec![Uuid::new_v4()]);
            body["total_budget"] = json!(budget);

            let (status, body) = app.post("/v1/projects", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{budget}: {body}");
            assert_eq!(error_code(&body), "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn test_missing_manager_is_400() {
        let app = TestApp::lazy();
        let mut body = project_body(Uuid::new_v4(), vec![Uuid::new_v4()]);
        body.as_object_mut().unwrap().remove("manager_id");

        let (status, _) = app.post("/v1/projects", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_date_is_400() {
        let app = TestApp::lazy();
        let mut body = project_body(Uuid::new_v4(), vec![Uuid::new_v4()]);
        body["start_date"] = json!("2024-13-01");

        let (status, _) = app.post("/v1/projects", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_status_in_patch_is_400() {
        let app = TestApp::lazy();
        let uri = format!("/v1/projects/{}/status", Uuid::new_v4());
        let (status, _) = app.patch(&uri, json!({ "status": "DONE" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_status_filter_is_400() {
        let app = TestApp::lazy();
        let (status, body) = app.get("/v1/projects?status=FINISHED").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_combined_filters_are_400() {
        let app = TestApp::lazy();
        let uri = format!("/v1/projects?name=apollo&manager_id={}", Uuid::new_v4());
        let (status, _) = app.get(&uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
