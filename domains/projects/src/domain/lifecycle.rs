//! Project lifecycle operations
//!
//! Every operation runs against a [`ProjectStore`]. HTTP handlers pass a
//! transaction for writes and a pooled connection for reads; tests pass the
//! in-memory store.

use async_trait::async_trait;
use portfolio_common::Result;
use uuid::Uuid;
use validator::Validate;

use super::allocation::{AllocationLookup, AllocationValidator};
use super::entities::{
    Project, ProjectRequest, ProjectStatus, ProjectWithManager, RiskClassification,
};
use super::errors::ProjectError;
use super::state::ProjectStateMachine;

/// Project persistence used by the lifecycle operations
#[async_trait]
pub trait ProjectStore: AllocationLookup {
    /// Find a project with its staff ids
    async fn find_project(&mut self, id: Uuid) -> Result<Option<Project>>;

    /// Persist a new project and its staff assignments
    async fn insert_project(&mut self, project: &Project) -> Result<()>;

    /// Overwrite a project and replace its staff assignments
    async fn update_project(&mut self, project: &Project) -> Result<()>;

    /// Remove a project and its staff assignments
    async fn delete_project(&mut self, id: Uuid) -> Result<()>;
}

async fn load<S>(store: &mut S, id: Uuid) -> Result<Project, ProjectError>
where
    S: ProjectStore + ?Sized,
{
    store
        .find_project(id)
        .await?
        .ok_or_else(|| ProjectError::project_not_found(id))
}

async fn with_manager<S>(
    store: &mut S,
    project: Project,
) -> Result<ProjectWithManager, ProjectError>
where
    S: ProjectStore + ?Sized,
{
    let manager = store
        .find_member(project.manager_id)
        .await?
        .ok_or_else(|| ProjectError::member_not_found(project.manager_id))?;
    Ok(ProjectWithManager::new(project, &manager))
}

fn check_fields(request: &ProjectRequest) -> Result<(), ProjectError> {
    request
        .validate()
        .map_err(|e| ProjectError::InvalidField(e.to_string()))
}

/// Create a project.
///
/// The project starts under review regardless of any status in the request.
pub async fn create<S>(
    store: &mut S,
    request: &ProjectRequest,
) -> Result<ProjectWithManager, ProjectError>
where
    S: ProjectStore + ?Sized,
{
    check_fields(request)?;
    let allocation = AllocationValidator::new(&mut *store)
        .validate_request(request, None)
        .await?;

    let project = Project::new(request, allocation.staff_ids);
    store.insert_project(&project).await?;

    tracing::info!(
        project_id = %project.id,
        manager_id = %project.manager_id,
        staff = project.staff_ids.len(),
        risk = ?project.risk_classification,
        "Project created"
    );
    Ok(ProjectWithManager::new(project, &allocation.manager))
}

/// Fetch a project with its manager's name
pub async fn get<S>(store: &mut S, id: Uuid) -> Result<ProjectWithManager, ProjectError>
where
    S: ProjectStore + ?Sized,
{
    let project = load(store, id).await?;
    with_manager(store, project).await
}

/// Replace a project's editable fields.
///
/// A status in the request must be a legal transition, and the status of a
/// started, in-progress or completed project cannot be changed here at all.
pub async fn update<S>(
    store: &mut S,
    id: Uuid,
    request: &ProjectRequest,
) -> Result<ProjectWithManager, ProjectError>
where
    S: ProjectStore + ?Sized,
{
    let mut project = load(store, id).await?;

    check_fields(request)?;
    let allocation = AllocationValidator::new(&mut *store)
        .validate_request(request, Some(&project))
        .await?;

    let status_change = request.status.filter(|target| *target != project.status);
    if let Some(target) = status_change {
        ProjectStateMachine::transition(project.status, target)?;
        if project.status.is_frozen() {
            tracing::warn!(
                project_id = %id,
                status = %project.status,
                "Rejected status change on frozen project"
            );
            return Err(ProjectError::FrozenStatus(project.status));
        }
    }

    project.apply_update(request, allocation.staff_ids);
    if let Some(target) = status_change {
        project.transition_to(target)?;
    }
    store.update_project(&project).await?;

    tracing::info!(project_id = %id, status = %project.status, "Project updated");
    Ok(ProjectWithManager::new(project, &allocation.manager))
}

/// Move a project to a new status through the state machine
pub async fn update_status<S>(
    store: &mut S,
    id: Uuid,
    target: ProjectStatus,
) -> Result<ProjectWithManager, ProjectError>
where
    S: ProjectStore + ?Sized,
{
    let mut project = load(store, id).await?;
    let from = project.status;

    if let Err(e) = project.transition_to(target) {
        tracing::warn!(project_id = %id, from = %from, to = %target, "Rejected status change");
        return Err(e);
    }
    store.update_project(&project).await?;

    tracing::info!(project_id = %id, from = %from, to = %target, "Project status changed");
    with_manager(store, project).await
}

/// Delete a project that has not yet started
pub async fn delete<S>(store: &mut S, id: Uuid) -> Result<(), ProjectError>
where
    S: ProjectStore + ?Sized,
{
    let project = load(store, id).await?;
    if !project.can_be_deleted() {
        tracing::warn!(
            project_id = %id,
            status = %project.status,
            "Rejected delete of frozen project"
        );
        return Err(ProjectError::NotDeletable(project.status));
    }

    store.delete_project(id).await?;
    tracing::info!(project_id = %id, "Project deleted");
    Ok(())
}

/// Current risk classification of a project
pub async fn risk_of<S>(store: &mut S, id: Uuid) -> Result<RiskClassification, ProjectError>
where
    S: ProjectStore + ?Sized,
{
    Ok(load(store, id).await?.risk_classification)
}
