//! Route definitions for the projects domain API

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{projects, reports};
use super::middleware::ProjectsState;

/// Create all projects domain API routes
pub fn routes() -> Router<ProjectsState> {
    Router::new()
        // Project CRUD
        .route(
            "/v1/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/v1/projects/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        // Lifecycle
        .route(
            "/v1/projects/{id}/status",
            patch(projects::update_project_status),
        )
        .route("/v1/projects/{id}/risk", get(projects::get_project_risk))
        // Reporting
        .route("/v1/reports/portfolio", get(reports::get_portfolio_report))
}
