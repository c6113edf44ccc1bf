//! In-memory member store
//!
//! Implements the registry store traits without a database so registry rules
//! (and the project rules built on top of them) can be exercised in tests.

use async_trait::async_trait;
use portfolio_common::{Error, Result};
use uuid::Uuid;

use crate::domain::entities::{Member, MemberRole};
use crate::domain::registry::{MemberLookup, MemberStore};

/// In-memory member store for testing
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberStore {
    members: Vec<Member>,
    conflict_on_insert: bool,
}

impl InMemoryMemberStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every insert fail with a conflict, as a unique index would
    pub fn with_conflicting_inserts(mut self) -> Self {
        self.conflict_on_insert = true;
        self
    }

    /// Seed a member directly, bypassing registry rules
    pub fn seed(&mut self, member: Member) -> Member {
        self.members.push(member.clone());
        member
    }

    /// Number of stored members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[async_trait]
impl MemberLookup for InMemoryMemberStore {
    async fn find_member(&mut self, id: Uuid) -> Result<Option<Member>> {
        Ok(self.members.iter().find(|m| m.id() == id).cloned())
    }
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn member_exists(&mut self, name: &str, role: MemberRole) -> Result<bool> {
        Ok(self
            .members
            .iter()
            .any(|m| m.name() == name && m.role() == role))
    }

    async fn insert_member(&mut self, member: &Member) -> Result<Member> {
        let collides = self
            .members
            .iter()
            .any(|m| m.name() == member.name() && m.role() == member.role());
        if self.conflict_on_insert || collides {
            return Err(Error::Conflict("Record already exists".to_string()));
        }
        Ok(self.seed(member.clone()))
    }

    async fn list_members(&mut self, role: Option<MemberRole>) -> Result<Vec<Member>> {
        let mut members: Vec<Member> = self
            .members
            .iter()
            .filter(|m| role.map_or(true, |r| m.role() == r))
            .cloned()
            .collect();
        members.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(members)
    }
}
