//! Allocation rules for project membership
//!
//! A project has exactly one manager and between one and
//! [`MAX_STAFF_PER_PROJECT`] staff members. A staff member may hold at most
//! [`MAX_ACTIVE_PROJECTS_PER_STAFF`] assignments on projects that are neither
//! completed nor cancelled. Checks run in a fixed order and stop at the first
//! violation.

use std::collections::BTreeSet;

use async_trait::async_trait;
use portfolio_common::Result;
use portfolio_members::{Member, MemberLookup};
use uuid::Uuid;

use super::entities::{
    Project, ProjectRequest, MAX_ACTIVE_PROJECTS_PER_STAFF, MAX_STAFF_PER_PROJECT,
};
use super::errors::ProjectError;

/// Member lookups plus the assignment count the capacity rule needs
#[async_trait]
pub trait AllocationLookup: MemberLookup {
    /// Number of active projects (not completed, not cancelled) the member is
    /// staffed on.
    ///
    /// Database implementations lock the member row first so that concurrent
    /// allocations of the same member are serialized.
    async fn count_active_assignments(&mut self, member_id: Uuid) -> Result<i64>;
}

/// Outcome of a successful validation
#[derive(Debug, Clone)]
pub struct ValidatedAllocation {
    pub manager: Member,
    /// Sorted, duplicates removed
    pub staff_ids: Vec<Uuid>,
}

/// Validates manager and staff references for a project request
pub struct AllocationValidator<'a, L: ?Sized> {
    lookup: &'a mut L,
}

impl<'a, L> AllocationValidator<'a, L>
where
    L: AllocationLookup + ?Sized,
{
    pub fn new(lookup: &'a mut L) -> Self {
        Self { lookup }
    }

    async fn fetch_member(&mut self, id: Uuid) -> Result<Member, ProjectError> {
        self.lookup
            .find_member(id)
            .await?
            .ok_or_else(|| ProjectError::member_not_found(id))
    }

    /// The member must exist and hold the manager role
    pub async fn validate_manager(&mut self, id: Uuid) -> Result<Member, ProjectError> {
        let member = self.fetch_member(id).await?;
        if !member.is_manager() {
            tracing::warn!(member_id = %id, "Rejected non-manager as project manager");
            return Err(ProjectError::NotManager(id));
        }
        Ok(member)
    }

    /// The member must exist and hold the staff role
    pub async fn validate_staff(&mut self, id: Uuid) -> Result<Member, ProjectError> {
        let member = self.fetch_member(id).await?;
        if !member.is_staff() {
            tracing::warn!(member_id = %id, "Rejected non-staff member as project staff");
            return Err(ProjectError::NotStaff(id));
        }
        Ok(member)
    }

    /// Whether the member has room for another active assignment
    pub async fn is_available(&mut self, id: Uuid) -> Result<bool, ProjectError> {
        let active = self.lookup.count_active_assignments(id).await?;
        Ok(active < MAX_ACTIVE_PROJECTS_PER_STAFF)
    }

    /// Run every allocation rule against a request.
    ///
    /// When `existing` is given, staff already on that project are not
    /// counted against their own capacity again.
    pub async fn validate_request(
        &mut self,
        request: &ProjectRequest,
        existing: Option<&Project>,
    ) -> Result<ValidatedAllocation, ProjectError> {
        let manager = self.validate_manager(request.manager_id).await?;

        let staff: BTreeSet<Uuid> = request.staff_ids.iter().copied().collect();
        if staff.is_empty() {
            return Err(ProjectError::EmptyStaffSet);
        }
        if staff.len() > MAX_STAFF_PER_PROJECT {
            return Err(ProjectError::TooManyStaff(staff.len()));
        }

        for &member_id in &staff {
            self.validate_staff(member_id).await?;

            let already_assigned = existing.is_some_and(|p| p.has_staff(member_id));
            if !already_assigned && !self.is_available(member_id).await? {
                tracing::warn!(member_id = %member_id, "Rejected staff member at capacity");
                return Err(ProjectError::StaffAtCapacity(member_id));
            }
        }

        if request.expected_end_date < request.start_date {
            return Err(ProjectError::InvalidDateRange {
                start_date: request.start_date,
                expected_end_date: request.expected_end_date,
            });
        }

        Ok(ValidatedAllocation {
            manager,
            staff_ids: staff.into_iter().collect(),
        })
    }
}
