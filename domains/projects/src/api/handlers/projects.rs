//! Project API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use portfolio_common::{Error, Page, Pagination, Result, ValidatedJson};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::ProjectsState;
use crate::domain::entities::{
    ProjectRequest, ProjectStatus, ProjectWithManager, RiskClassification,
};
use crate::domain::lifecycle;
use crate::repository::ProjectFilter;

/// Query parameters for listing projects.
///
/// At most one of `name`, `status`, `manager_id` and `staff_id` may be given.
#[derive(Debug, Deserialize, Default)]
pub struct ListProjectsParams {
    pub name: Option<String>,
    pub status: Option<String>,
    pub manager_id: Option<Uuid>,
    pub staff_id: Option<Uuid>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl ListProjectsParams {
    fn filter(&self) -> Result<ProjectFilter> {
        let mut filters = Vec::new();

        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            filters.push(ProjectFilter::NameContains(name.to_string()));
        }
        if let Some(ref status) = self.status {
            let status = ProjectStatus::parse(status)
                .ok_or_else(|| Error::Validation(format!("Invalid project status '{status}'")))?;
            filters.push(ProjectFilter::Status(status));
        }
        if let Some(id) = self.manager_id {
            filters.push(ProjectFilter::Manager(id));
        }
        if let Some(id) = self.staff_id {
            filters.push(ProjectFilter::Staff(id));
        }

        match filters.len() {
            0 => Ok(ProjectFilter::All),
            1 => Ok(filters.remove(0)),
            _ => Err(Error::Validation(
                "Only one of name, status, manager_id or staff_id may be given".to_string(),
            )),
        }
    }

    fn pagination(&self) -> Pagination {
        Pagination {
            offset: self.offset,
            limit: self.limit,
        }
    }
}

/// Request for a status change
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    pub status: ProjectStatus,
}

/// Project response DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub expected_end_date: NaiveDate,
    pub actual_end_date: Option<NaiveDate>,
    pub total_budget: Decimal,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub status_label: String,
    pub risk_classification: RiskClassification,
    pub risk_label: String,
    pub manager_id: Uuid,
    pub manager_name: String,
    pub staff_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectWithManager> for ProjectResponse {
    fn from(view: ProjectWithManager) -> Self {
        let p = view.project;
        Self {
            id: p.id,
            name: p.name,
            start_date: p.start_date,
            expected_end_date: p.expected_end_date,
            actual_end_date: p.actual_end_date,
            total_budget: p.total_budget,
            description: p.description,
            status: p.status,
            status_label: p.status.label().to_string(),
            risk_classification: p.risk_classification,
            risk_label: p.risk_classification.label().to_string(),
            manager_id: p.manager_id,
            manager_name: view.manager_name,
            staff_ids: p.staff_ids,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Risk classification response
#[derive(Debug, Serialize, Deserialize)]
pub struct RiskResponse {
    pub project_id: Uuid,
    pub risk_classification: RiskClassification,
    pub risk_label: String,
}

/// List projects
///
/// **GET /v1/projects?status=IN_PROGRESS&offset=0&limit=50**
pub async fn list_projects(
    State(state): State<ProjectsState>,
    Query(params): Query<ListProjectsParams>,
) -> Result<Json<Page<ProjectResponse>>> {
    let filter = params.filter()?;
    let page = state
        .repos
        .projects
        .list(&filter, &params.pagination())
        .await?;

    Ok(Json(page.map(Into::into)))
}

/// Create a project
///
/// **POST /v1/projects**
pub async fn create_project(
    State(state): State<ProjectsState>,
    ValidatedJson(request): ValidatedJson<ProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>)> {
    let mut tx = state.repos.begin().await?;
    let project = lifecycle::create(&mut *tx, &request).await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(project.into())))
}

/// Get a project by ID
///
/// **GET /v1/projects/{id}**
pub async fn get_project(
    State(state): State<ProjectsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectResponse>> {
    let mut conn = state.repos.acquire().await?;
    let project = lifecycle::get(&mut *conn, id).await?;
    Ok(Json(project.into()))
}

/// Update a project
///
/// **PUT /v1/projects/{id}**
pub async fn update_project(
    State(state): State<ProjectsState>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<ProjectRequest>,
) -> Result<Json<ProjectResponse>> {
    let mut tx = state.repos.begin().await?;
    let project = lifecycle::update(&mut *tx, id, &request).await?;
    tx.commit().await?;

    Ok(Json(project.into()))
}

/// Change a project's status
///
/// **PATCH /v1/projects/{id}/status**
pub async fn update_project_status(
    State(state): State<ProjectsState>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> Result<Json<ProjectResponse>> {
    let mut tx = state.repos.begin().await?;
    let project = lifecycle::update_status(&mut *tx, id, request.status).await?;
    tx.commit().await?;

    Ok(Json(project.into()))
}

/// Delete a project that has not started
///
/// **DELETE /v1/projects/{id}**
pub async fn delete_project(
    State(state): State<ProjectsState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let mut tx = state.repos.begin().await?;
    lifecycle::delete(&mut *tx, id).await?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Risk classification of a project
///
/// **GET /v1/projects/{id}/risk**
pub async fn get_project_risk(
    State(state): State<ProjectsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RiskResponse>> {
    let mut conn = state.repos.acquire().await?;
    let risk = lifecycle::risk_of(&mut *conn, id).await?;

    Ok(Json(RiskResponse {
        project_id: id,
        risk_classification: risk,
        risk_label: risk.label().to_string(),
    }))
}
