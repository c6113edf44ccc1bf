//! Projects domain state

use crate::ProjectsRepositories;

/// Application state for the projects domain
#[derive(Clone)]
pub struct ProjectsState {
    pub repos: ProjectsRepositories,
}
