//! Domain entities for the members domain
//!
//! A member is either a manager or a staff member. The role is fixed when the
//! member is registered: there is no setter and no role-change operation.

use chrono::{DateTime, Utc};
use portfolio_common::Error;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Maximum length of a member name
pub const MAX_MEMBER_NAME_LEN: usize = 100;

/// Errors raised by the member registry
#[derive(Debug, Error)]
pub enum MemberError {
    #[error("Invalid role '{0}': must be 'manager' or 'staff'")]
    InvalidRole(String),

    #[error("Member name must be 1-{} characters", MAX_MEMBER_NAME_LEN)]
    InvalidName,

    #[error("A member named '{name}' with role '{role}' already exists")]
    DuplicateMember { name: String, role: MemberRole },

    #[error("Member {0} not found")]
    NotFound(Uuid),

    #[error(transparent)]
    Store(#[from] Error),
}

impl From<MemberError> for Error {
    fn from(err: MemberError) -> Self {
        match err {
            MemberError::NotFound(_) => Error::NotFound(err.to_string()),
            MemberError::Store(inner) => inner,
            MemberError::InvalidRole(_)
            | MemberError::InvalidName
            | MemberError::DuplicateMember { .. } => Error::Validation(err.to_string()),
        }
    }
}

/// Member role
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, sqlx::Type,
)]
#[sqlx(type_name = "member_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Manager,
    Staff,
}

impl MemberRole {
    /// Parse a role name, case-insensitively.
    ///
    /// Accepts `manager`/`staff` and the legacy `gerente`/`funcionario` spellings.
    pub fn parse(value: &str) -> Result<Self, MemberError> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "manager" | "gerente" => Ok(MemberRole::Manager),
            "staff" | "funcionario" => Ok(MemberRole::Staff),
            _ => Err(MemberError::InvalidRole(value.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Manager => "manager",
            MemberRole::Staff => "staff",
        }
    }
}

impl FromStr for MemberRole {
    type Err = MemberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for MemberRole {
    #[mutants::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Member entity
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Member {
    id: Uuid,
    name: String,
    role: MemberRole,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Member {
    /// Create a new member with validation
    pub fn new(name: impl Into<String>, role: MemberRole) -> Result<Self, MemberError> {
        let name = name.into().trim().to_string();
        if name.is_empty() || name.chars().count() > MAX_MEMBER_NAME_LEN {
            return Err(MemberError::InvalidName);
        }

        let now = Utc::now();
        Ok(Member {
            id: Uuid::new_v4(),
            name,
            role,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> MemberRole {
        self.role
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_manager(&self) -> bool {
        self.role == MemberRole::Manager
    }

    pub fn is_staff(&self) -> bool {
        self.role == MemberRole::Staff
    }
}
