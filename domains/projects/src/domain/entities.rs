//! Domain entities for the projects domain
//!
//! This module contains the project entity, its status and risk enums, and the
//! request shape used for both creation and update.

use chrono::{DateTime, NaiveDate, Utc};
use portfolio_members::Member;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::errors::ProjectError;
use crate::domain::risk;
use crate::domain::state::ProjectStateMachine;

/// Maximum number of staff members on one project
pub const MAX_STAFF_PER_PROJECT: usize = 10;

/// A staff member may hold at most this many active assignments
pub const MAX_ACTIVE_PROJECTS_PER_STAFF: i64 = 3;

/// Maximum length of a project name
pub const MAX_PROJECT_NAME_LEN: usize = 200;

/// `MAX_PROJECT_NAME_LEN` as `u64`, the type the `validator` length attribute expects.
const MAX_PROJECT_NAME_LEN_U64: u64 = MAX_PROJECT_NAME_LEN as u64;

/// Budgets must stay below this; the column is `NUMERIC(15, 2)`
pub const BUDGET_UPPER_BOUND: i64 = 10_000_000_000_000;

/// Budgets carry at most cents
pub const BUDGET_MAX_SCALE: u32 = 2;

/// Project status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    sqlx::Type,
    Default,
)]
#[sqlx(type_name = "project_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    UnderReview,
    ReviewCompleted,
    ReviewApproved,
    Started,
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 8] = [
        ProjectStatus::UnderReview,
        ProjectStatus::ReviewCompleted,
        ProjectStatus::ReviewApproved,
        ProjectStatus::Started,
        ProjectStatus::Planned,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::Cancelled,
    ];

    /// Machine name, as stored and serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::UnderReview => "UNDER_REVIEW",
            ProjectStatus::ReviewCompleted => "REVIEW_COMPLETED",
            ProjectStatus::ReviewApproved => "REVIEW_APPROVED",
            ProjectStatus::Started => "STARTED",
            ProjectStatus::Planned => "PLANNED",
            ProjectStatus::InProgress => "IN_PROGRESS",
            ProjectStatus::Completed => "COMPLETED",
            ProjectStatus::Cancelled => "CANCELLED",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::UnderReview => "under review",
            ProjectStatus::ReviewCompleted => "review completed",
            ProjectStatus::ReviewApproved => "review approved",
            ProjectStatus::Started => "started",
            ProjectStatus::Planned => "planned",
            ProjectStatus::InProgress => "in progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a machine name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
    }

    /// Active projects count against a staff member's allocation capacity
    pub fn is_active(&self) -> bool {
        !matches!(self, ProjectStatus::Completed | ProjectStatus::Cancelled)
    }

    /// Past these states the general update may no longer touch the status,
    /// and the project can no longer be deleted
    pub fn is_frozen(&self) -> bool {
        matches!(
            self,
            ProjectStatus::Started | ProjectStatus::InProgress | ProjectStatus::Completed
        )
    }
}

impl std::fmt::Display for ProjectStatus {
    #[mutants::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk classification derived from budget and duration
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "risk_classification", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskClassification {
    Low,
    Medium,
    High,
}

impl RiskClassification {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            RiskClassification::Low => "Low risk",
            RiskClassification::Medium => "Medium risk",
            RiskClassification::High => "High risk",
        }
    }
}

/// Project entity
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub expected_end_date: NaiveDate,
    pub actual_end_date: Option<NaiveDate>,
    pub total_budget: Decimal,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub risk_classification: RiskClassification,
    pub manager_id: Uuid,
    /// Sorted, without duplicates
    pub staff_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Build a new project from a request whose allocation has been validated.
    ///
    /// New projects always start under review.
    pub fn new(request: &ProjectRequest, staff_ids: Vec<Uuid>) -> Self {
        let now = Utc::now();
        Project {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            start_date: request.start_date,
            expected_end_date: request.expected_end_date,
            actual_end_date: None,
            total_budget: request.total_budget,
            description: request.description.clone(),
            status: ProjectStatus::UnderReview,
            risk_classification: risk::classify(
                request.total_budget,
                request.start_date,
                request.expected_end_date,
            ),
            manager_id: request.manager_id,
            staff_ids: normalize_staff(staff_ids),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields from a validated request.
    ///
    /// Optional fields are only applied when present. The status is left
    /// alone; status changes go through [`Project::transition_to`].
    pub fn apply_update(&mut self, request: &ProjectRequest, staff_ids: Vec<Uuid>) {
        self.name = request.name.trim().to_string();
        self.start_date = request.start_date;
        self.expected_end_date = request.expected_end_date;
        self.total_budget = request.total_budget;
        if let Some(ref description) = request.description {
            self.description = Some(description.clone());
        }
        if let Some(actual_end_date) = request.actual_end_date {
            self.actual_end_date = Some(actual_end_date);
        }
        self.manager_id = request.manager_id;
        self.staff_ids = normalize_staff(staff_ids);
        self.recompute_risk();
        self.updated_at = Utc::now();
    }

    /// Move to `target` through the state machine.
    ///
    /// Entering `COMPLETED` stamps `actual_end_date` with today's date.
    pub fn transition_to(&mut self, target: ProjectStatus) -> Result<(), ProjectError> {
        let next = ProjectStateMachine::transition(self.status, target)?;
        self.status = next;
        if next == ProjectStatus::Completed {
            self.actual_end_date = Some(Utc::now().date_naive());
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Recompute the risk classification from budget and schedule
    pub fn recompute_risk(&mut self) {
        self.risk_classification =
            risk::classify(self.total_budget, self.start_date, self.expected_end_date);
    }

    /// Deletion is only allowed before the project is frozen
    pub fn can_be_deleted(&self) -> bool {
        !self.status.is_frozen()
    }

    /// Whether the member is on this project's staff
    pub fn has_staff(&self, member_id: Uuid) -> bool {
        self.staff_ids.binary_search(&member_id).is_ok()
    }
}

fn normalize_staff(mut staff_ids: Vec<Uuid>) -> Vec<Uuid> {
    staff_ids.sort_unstable();
    staff_ids.dedup();
    staff_ids
}

/// Project joined with its manager's name
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ProjectWithManager {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub project: Project,
    pub manager_name: String,
}

impl ProjectWithManager {
    pub fn new(project: Project, manager: &Member) -> Self {
        Self {
            project,
            manager_name: manager.name().to_string(),
        }
    }
}

/// Request for creating or updating a project
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProjectRequest {
    #[validate(
        length(min = 1, max = MAX_PROJECT_NAME_LEN_U64),
        custom(function = "validate_not_blank", message = "Project name must not be blank")
    )]
    pub name: String,

    pub start_date: NaiveDate,

    pub expected_end_date: NaiveDate,

    /// Only honoured on update
    #[serde(default)]
    pub actual_end_date: Option<NaiveDate>,

    #[validate(custom(function = "validate_budget"))]
    pub total_budget: Decimal,

    #[serde(default)]
    pub description: Option<String>,

    /// Only honoured on update; new projects always start under review
    #[serde(default)]
    pub status: Option<ProjectStatus>,

    pub manager_id: Uuid,

    #[serde(default, alias = "member_ids")]
    pub staff_ids: Vec<Uuid>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_budget(budget: &Decimal) -> Result<(), ValidationError> {
    if budget.is_sign_negative() && !budget.is_zero() {
        return Err(ValidationError::new("negative_budget")
            .with_message("Total budget must not be negative".into()));
    }
    if *budget >= Decimal::from(BUDGET_UPPER_BOUND) {
        return Err(ValidationError::new("budget_too_large")
            .with_message("Total budget must be below 10000000000000".into()));
    }
    if budget.normalize().scale() > BUDGET_MAX_SCALE {
        return Err(ValidationError::new("budget_precision")
            .with_message("Total budget must have at most two decimal places".into()));
    }
    Ok(())
}
