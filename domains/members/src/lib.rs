//! Members domain: the registry of managers and staff that projects reference

pub mod api;
pub mod domain;
pub mod mock;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Member, MemberError, MemberRole, MAX_MEMBER_NAME_LEN};
pub use domain::registry::{self, MemberLookup, MemberStore};
pub use repository::MembersRepositories;

// Re-export API types
pub use api::routes;
pub use api::MembersState;
