//! Projects domain: project lifecycle, staff allocation rules, risk classification
//! and the portfolio report

pub mod api;
pub mod domain;
pub mod mock;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::allocation::{AllocationLookup, AllocationValidator, ValidatedAllocation};
pub use domain::entities::{
    Project, ProjectRequest, ProjectStatus, ProjectWithManager, RiskClassification,
    BUDGET_MAX_SCALE, BUDGET_UPPER_BOUND, MAX_ACTIVE_PROJECTS_PER_STAFF, MAX_PROJECT_NAME_LEN,
    MAX_STAFF_PER_PROJECT,
};
pub use domain::errors::ProjectError;
pub use domain::lifecycle::{self, ProjectStore};
pub use domain::report::{self, PortfolioReport, ReportSource};
pub use domain::risk;
pub use domain::state::ProjectStateMachine;
pub use repository::{ProjectFilter, ProjectRepository, ProjectsRepositories};

// Re-export API types
pub use api::routes;
pub use api::ProjectsState;
