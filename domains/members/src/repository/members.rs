//! Postgres member store

use async_trait::async_trait;
use portfolio_common::{RepositoryError, Result};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::domain::entities::{Member, MemberRole};
use crate::domain::registry::{MemberLookup, MemberStore};

/// Column list shared by member queries
pub const MEMBER_COLUMNS: &str = "id, name, role, created_at, updated_at";

#[async_trait]
impl MemberLookup for PgConnection {
    async fn find_member(&mut self, id: Uuid) -> Result<Option<Member>> {
        let query = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1");
        let row = sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_optional(&mut *self)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl MemberStore for PgConnection {
    async fn member_exists(&mut self, name: &str, role: MemberRole) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM members WHERE name = $1 AND role = $2)",
        )
        .bind(name)
        .bind(role)
        .fetch_one(&mut *self)
        .await?;
        Ok(exists)
    }

    async fn insert_member(&mut self, member: &Member) -> Result<Member> {
        let query = format!(
            "INSERT INTO members ({MEMBER_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {MEMBER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Member>(&query)
            .bind(member.id())
            .bind(member.name())
            .bind(member.role())
            .bind(member.created_at())
            .bind(member.updated_at())
            .fetch_one(&mut *self)
            .await
            .map_err(RepositoryError::from)?;
        Ok(row)
    }

    async fn list_members(&mut self, role: Option<MemberRole>) -> Result<Vec<Member>> {
        let rows = match role {
            Some(role) => {
                let query = format!(
                    "SELECT {MEMBER_COLUMNS} FROM members WHERE role = $1 ORDER BY name ASC, id ASC"
                );
                sqlx::query_as::<_, Member>(&query)
                    .bind(role)
                    .fetch_all(&mut *self)
                    .await?
            }
            None => {
                let query =
                    format!("SELECT {MEMBER_COLUMNS} FROM members ORDER BY name ASC, id ASC");
                sqlx::query_as::<_, Member>(&query)
                    .fetch_all(&mut *self)
                    .await?
            }
        };
        Ok(rows)
    }
}
