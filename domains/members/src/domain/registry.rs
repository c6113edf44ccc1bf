//! Member registry operations
//!
//! The registry is written against two store traits so the same rules run on a
//! Postgres connection, inside a transaction, or against the in-memory store.
//! Methods take `&mut self` because a database connection is used exclusively
//! while a query runs; [`MemberLookup`] never writes.

use async_trait::async_trait;
use portfolio_common::{Error, Result};
use uuid::Uuid;

use super::entities::{Member, MemberError, MemberRole};

/// Read-only access to member records
#[async_trait]
pub trait MemberLookup: Send {
    /// Find a member by id
    async fn find_member(&mut self, id: Uuid) -> Result<Option<Member>>;
}

/// Full member persistence used by the registry
#[async_trait]
pub trait MemberStore: MemberLookup {
    /// Whether a member with this exact name and role exists
    async fn member_exists(&mut self, name: &str, role: MemberRole) -> Result<bool>;

    /// Persist a new member.
    ///
    /// Implementations report a (name, role) collision as [`Error::Conflict`].
    async fn insert_member(&mut self, member: &Member) -> Result<Member>;

    /// List members ordered by name, optionally restricted to one role
    async fn list_members(&mut self, role: Option<MemberRole>) -> Result<Vec<Member>>;
}

/// Register a new member
pub async fn create<S>(store: &mut S, name: &str, role: &str) -> Result<Member, MemberError>
where
    S: MemberStore + ?Sized,
{
    let role = MemberRole::parse(role)?;
    let member = Member::new(name, role)?;

    let duplicate = || MemberError::DuplicateMember {
        name: member.name().to_string(),
        role,
    };

    if store.member_exists(member.name(), role).await? {
        tracing::warn!(name = %member.name(), role = %role, "Rejected duplicate member");
        return Err(duplicate());
    }

    let created = match store.insert_member(&member).await {
        Ok(created) => created,
        // Lost a race with a concurrent insert of the same (name, role)
        Err(Error::Conflict(_)) => return Err(duplicate()),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(member_id = %created.id(), role = %role, "Member registered");
    Ok(created)
}

/// Fetch a member by id
pub async fn get_by_id<S>(store: &mut S, id: Uuid) -> Result<Member, MemberError>
where
    S: MemberLookup + ?Sized,
{
    store
        .find_member(id)
        .await?
        .ok_or(MemberError::NotFound(id))
}

/// List every member
pub async fn list<S>(store: &mut S) -> Result<Vec<Member>, MemberError>
where
    S: MemberStore + ?Sized,
{
    Ok(store.list_members(None).await?)
}

/// List members holding the given role
pub async fn list_by_role<S>(store: &mut S, role: &str) -> Result<Vec<Member>, MemberError>
where
    S: MemberStore + ?Sized,
{
    let role = MemberRole::parse(role)?;
    Ok(store.list_members(Some(role)).await?)
}
