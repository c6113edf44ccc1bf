//! Member registry API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use portfolio_common::{Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::api::middleware::MembersState;
use crate::domain::entities::{Member, MemberRole};
use crate::domain::registry;

/// Request for registering a member
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMemberRequest {
    /// Display name, unique per role
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// `manager` or `staff`
    #[validate(custom(function = "validate_role"))]
    pub role: String,
}

/// Reject unknown roles before a transaction is opened
fn validate_role(role: &str) -> std::result::Result<(), ValidationError> {
    MemberRole::parse(role).map(|_| ()).map_err(|_| {
        ValidationError::new("invalid_role").with_message("must be 'manager' or 'staff'".into())
    })
}

/// Query parameters for listing members
#[derive(Debug, Deserialize, Default)]
pub struct MemberListQuery {
    /// Restrict the list to one role
    pub role: Option<String>,
}

/// Member response DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct MemberResponse {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Member> for MemberResponse {
    fn from(m: Member) -> Self {
        Self {
            id: m.id(),
            name: m.name().to_string(),
            role: m.role().as_str().to_string(),
            created_at: m.created_at(),
            updated_at: m.updated_at(),
        }
    }
}

/// Register a member
///
/// **POST /v1/members**
pub async fn create_member(
    State(state): State<MembersState>,
    ValidatedJson(request): ValidatedJson<CreateMemberRequest>,
) -> Result<(StatusCode, Json<MemberResponse>)> {
    // Existence check and insert share one transaction; the unique index
    // on (name, role) catches whatever slips between them
    let mut tx = state.repos.begin().await?;
    let member = registry::create(&mut *tx, &request.name, &request.role).await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(member.into())))
}

/// Get a member by ID
///
/// **GET /v1/members/{id}**
pub async fn get_member(
    State(state): State<MembersState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MemberResponse>> {
    let mut conn = state.repos.acquire().await?;
    let member = registry::get_by_id(&mut *conn, id).await?;
    Ok(Json(member.into()))
}

/// List members, optionally by role
///
/// **GET /v1/members?role=staff**
pub async fn list_members(
    State(state): State<MembersState>,
    Query(query): Query<MemberListQuery>,
) -> Result<Json<Vec<MemberResponse>>> {
    let mut conn = state.repos.acquire().await?;
    let members = match query.role.as_deref() {
        Some(role) => registry::list_by_role(&mut *conn, role).await?,
        None => registry::list(&mut *conn).await?,
    };

    Ok(Json(members.into_iter().map(Into::into).collect()))
}
