//! In-memory portfolio store
//!
//! Members and projects held in memory, implementing every store trait the
//! lifecycle, allocation and report code needs.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use portfolio_common::{Error, Result};
use portfolio_members::mock::InMemoryMemberStore;
use portfolio_members::{Member, MemberLookup, MemberRole};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::allocation::AllocationLookup;
use crate::domain::entities::{Project, ProjectStatus};
use crate::domain::lifecycle::ProjectStore;
use crate::domain::report::ReportSource;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPortfolioStore {
    members: InMemoryMemberStore,
    projects: BTreeMap<Uuid, Project>,
}

impl InMemoryPortfolioStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a member directly
    ///
    /// # Panics
    /// If the name is blank or too long.
    pub fn seed_member(&mut self, name: &str, role: MemberRole) -> Member {
        let member = Member::new(name, role).expect("valid member name");
        self.members.seed(member)
    }

    /// Store a project directly, bypassing lifecycle rules
    pub fn seed_project(&mut self, project: Project) -> Project {
        self.projects.insert(project.id, project.clone());
        project
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }
}

#[async_trait]
impl MemberLookup for InMemoryPortfolioStore {
    async fn find_member(&mut self, id: Uuid) -> Result<Option<Member>> {
        self.members.find_member(id).await
    }
}

#[async_trait]
impl AllocationLookup for InMemoryPortfolioStore {
    async fn count_active_assignments(&mut self, member_id: Uuid) -> Result<i64> {
        let count = self
            .projects
            .values()
            .filter(|p| p.status.is_active() && p.has_staff(member_id))
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl ProjectStore for InMemoryPortfolioStore {
    async fn find_project(&mut self, id: Uuid) -> Result<Option<Project>> {
        Ok(self.projects.get(&id).cloned())
    }

    async fn insert_project(&mut self, project: &Project) -> Result<()> {
        if self.projects.contains_key(&project.id) {
            return Err(Error::Conflict("Record already exists".to_string()));
        }
        self.seed_project(project.clone());
        Ok(())
    }

    async fn update_project(&mut self, project: &Project) -> Result<()> {
        match self.projects.get_mut(&project.id) {
            Some(stored) => {
                *stored = project.clone();
                Ok(())
            }
            None => Err(Error::NotFound(format!("Project {} not found", project.id))),
        }
    }

    async fn delete_project(&mut self, id: Uuid) -> Result<()> {
        self.projects
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(format!("Project {id} not found")))
    }
}

#[async_trait]
impl ReportSource for InMemoryPortfolioStore {
    async fn count_by_status(&mut self) -> Result<Vec<(ProjectStatus, i64)>> {
        let mut counts: HashMap<ProjectStatus, i64> = HashMap::new();
        for project in self.projects.values() {
            *counts.entry(project.status).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn budget_by_status(&mut self) -> Result<Vec<(ProjectStatus, Decimal)>> {
        let mut budgets: HashMap<ProjectStatus, Decimal> = HashMap::new();
        for project in self.projects.values() {
            *budgets.entry(project.status).or_default() += project.total_budget;
        }
        Ok(budgets.into_iter().collect())
    }

    async fn average_completed_duration_days(&mut self) -> Result<Option<f64>> {
        let durations: Vec<i64> = self
            .projects
            .values()
            .filter(|p| p.status == ProjectStatus::Completed)
            .filter_map(|p| p.actual_end_date.map(|end| (end - p.start_date).num_days()))
            .collect();

        if durations.is_empty() {
            return Ok(None);
        }
        Ok(Some(
            durations.iter().sum::<i64>() as f64 / durations.len() as f64,
        ))
    }

    async fn count_distinct_staff(&mut self) -> Result<i64> {
        let staff: BTreeSet<Uuid> = self
            .projects
            .values()
            .flat_map(|p| p.staff_ids.iter().copied())
            .collect();
        Ok(staff.len() as i64)
    }
}
