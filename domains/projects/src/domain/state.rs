//! Project lifecycle state machine
//!
//! A project moves forward one step at a time through
//! `UNDER_REVIEW -> REVIEW_COMPLETED -> REVIEW_APPROVED -> STARTED -> PLANNED -> IN_PROGRESS -> COMPLETED`.
//! `CANCELLED` is reachable from every state, including `COMPLETED` and
//! `CANCELLED` itself. Nothing leaves `CANCELLED`.

use portfolio_common::StateError;

use super::entities::ProjectStatus;

/// Project status transitions
pub struct ProjectStateMachine;

impl ProjectStateMachine {
    /// Statuses reachable from `current` in a single step
    pub fn valid_transitions(current: ProjectStatus) -> &'static [ProjectStatus] {
        use ProjectStatus::*;
        match current {
            UnderReview => &[ReviewCompleted, Cancelled],
            ReviewCompleted => &[ReviewApproved, Cancelled],
            ReviewApproved => &[Started, Cancelled],
            Started => &[Planned, Cancelled],
            Planned => &[InProgress, Cancelled],
            InProgress => &[Completed, Cancelled],
            Completed => &[Cancelled],
            Cancelled => &[Cancelled],
        }
    }

    /// Whether `current -> target` is a legal step
    pub fn can_transition(current: ProjectStatus, target: ProjectStatus) -> bool {
        Self::valid_transitions(current).contains(&target)
    }

    /// Attempt `current -> target`, returning the new status on success
    pub fn transition(
        current: ProjectStatus,
        target: ProjectStatus,
    ) -> Result<ProjectStatus, StateError> {
        if Self::can_transition(current, target) {
            return Ok(target);
        }

        if current == ProjectStatus::Cancelled {
            return Err(StateError::TerminalState(current.to_string()));
        }

        Err(StateError::InvalidTransition {
            from: current.to_string(),
            to: target.to_string(),
        })
    }
}
