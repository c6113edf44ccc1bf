//! Errors raised by project rules

use chrono::NaiveDate;
use portfolio_common::{Error, StateError};
use thiserror::Error;
use uuid::Uuid;

use super::entities::{ProjectStatus, MAX_ACTIVE_PROJECTS_PER_STAFF, MAX_STAFF_PER_PROJECT};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Member {0} is not a manager")]
    NotManager(Uuid),

    #[error("Member {0} is not a staff member")]
    NotStaff(Uuid),

    #[error(
        "Member {0} is already allocated to {} active projects",
        MAX_ACTIVE_PROJECTS_PER_STAFF
    )]
    StaffAtCapacity(Uuid),

    #[error("A project needs at least one staff member")]
    EmptyStaffSet,

    #[error(
        "A project can have at most {} staff members, got {0}",
        MAX_STAFF_PER_PROJECT
    )]
    TooManyStaff(usize),

    #[error("Expected end date {expected_end_date} is before start date {start_date}")]
    InvalidDateRange {
        start_date: NaiveDate,
        expected_end_date: NaiveDate,
    },

    #[error("Invalid project data: {0}")]
    InvalidField(String),

    #[error("Invalid status change: {0}")]
    InvalidTransition(#[from] StateError),

    #[error("Status cannot be changed by update while the project is {}", .0.label())]
    FrozenStatus(ProjectStatus),

    #[error("A project that is {} cannot be deleted", .0.label())]
    NotDeletable(ProjectStatus),

    #[error(transparent)]
    Store(#[from] Error),
}

impl ProjectError {
    pub fn project_not_found(id: Uuid) -> Self {
        ProjectError::NotFound {
            entity: "Project",
            id,
        }
    }

    pub fn member_not_found(id: Uuid) -> Self {
        ProjectError::NotFound {
            entity: "Member",
            id,
        }
    }
}

impl From<ProjectError> for Error {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound { .. } => Error::NotFound(err.to_string()),
            ProjectError::Store(inner) => inner,
            _ => Error::Validation(err.to_string()),
        }
    }
}
