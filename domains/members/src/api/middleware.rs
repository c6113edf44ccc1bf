//! Members domain state

use crate::MembersRepositories;

/// Application state for the members domain
#[derive(Clone)]
pub struct MembersState {
    pub repos: MembersRepositories,
}
