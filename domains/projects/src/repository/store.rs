//! Postgres implementations of the project store traits
//!
//! Implemented on `PgConnection` so the same code runs on a pooled connection
//! or inside a transaction.

use async_trait::async_trait;
use portfolio_common::{Error, RepositoryError, Result};
use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::domain::allocation::AllocationLookup;
use crate::domain::entities::{Project, ProjectStatus};
use crate::domain::lifecycle::ProjectStore;
use crate::domain::report::ReportSource;

/// Project columns, with staff ids aggregated from `project_staff`.
///
/// Expects `projects` to be aliased as `p`.
pub const PROJECT_COLUMNS: &str = "p.id, p.name, p.start_date, p.expected_end_date, \
     p.actual_end_date, p.total_budget, p.description, p.status, p.risk_classification, \
     p.manager_id, p.created_at, p.updated_at, \
     ARRAY(SELECT ps.member_id FROM project_staff ps \
           WHERE ps.project_id = p.id ORDER BY ps.member_id) AS staff_ids";

async fn insert_staff(conn: &mut PgConnection, project: &Project) -> Result<()> {
    sqlx::query(
        "INSERT INTO project_staff (project_id, member_id) \
         SELECT $1, UNNEST($2::uuid[])",
    )
    .bind(project.id)
    .bind(&project.staff_ids)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

#[async_trait]
impl AllocationLookup for PgConnection {
    async fn count_active_assignments(&mut self, member_id: Uuid) -> Result<i64> {
        // Serializes concurrent allocations of the same member until commit
        sqlx::query("SELECT 1 FROM members WHERE id = $1 FOR UPDATE")
            .bind(member_id)
            .execute(&mut *self)
            .await?;

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM project_staff ps
            JOIN projects p ON p.id = ps.project_id
            WHERE ps.member_id = $1
              AND p.status NOT IN ('COMPLETED', 'CANCELLED')
            "#,
        )
        .bind(member_id)
        .fetch_one(&mut *self)
        .await?;
        Ok(count)
    }
}

#[async_trait]
impl ProjectStore for PgConnection {
    async fn find_project(&mut self, id: Uuid) -> Result<Option<Project>> {
        let query =
            format!("SELECT {PROJECT_COLUMNS} FROM projects p WHERE p.id = $1 FOR UPDATE OF p");
        let row = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&mut *self)
            .await?;
        Ok(row)
    }

    async fn insert_project(&mut self, project: &Project) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO projects (
                id, name, start_date, expected_end_date, actual_end_date, total_budget,
                description, status, risk_classification, manager_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(project.id)
        .bind(&project.name)
        .bind(project.start_date)
        .bind(project.expected_end_date)
        .bind(project.actual_end_date)
        .bind(project.total_budget)
        .bind(&project.description)
        .bind(project.status)
        .bind(project.risk_classification)
        .bind(project.manager_id)
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&mut *self)
        .await
        .map_err(RepositoryError::from)?;

        insert_staff(self, project).await
    }

    async fn update_project(&mut self, project: &Project) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET name = $2, start_date = $3, expected_end_date = $4, actual_end_date = $5,
                total_budget = $6, description = $7, status = $8, risk_classification = $9,
                manager_id = $10, updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(project.id)
        .bind(&project.name)
        .bind(project.start_date)
        .bind(project.expected_end_date)
        .bind(project.actual_end_date)
        .bind(project.total_budget)
        .bind(&project.description)
        .bind(project.status)
        .bind(project.risk_classification)
        .bind(project.manager_id)
        .bind(project.updated_at)
        .execute(&mut *self)
        .await
        .map_err(RepositoryError::from)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Project {} not found", project.id)));
        }

        sqlx::query("DELETE FROM project_staff WHERE project_id = $1")
            .bind(project.id)
            .execute(&mut *self)
            .await?;
        insert_staff(self, project).await
    }

    async fn delete_project(&mut self, id: Uuid) -> Result<()> {
        // project_staff rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *self)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Project {id} not found")));
        }
        Ok(())
    }
}

#[async_trait]
impl ReportSource for PgConnection {
    async fn count_by_status(&mut self) -> Result<Vec<(ProjectStatus, i64)>> {
        let rows = sqlx::query_as::<_, (ProjectStatus, i64)>(
            "SELECT status, COUNT(*) FROM projects GROUP BY status",
        )
        .fetch_all(&mut *self)
        .await?;
        Ok(rows)
    }

    async fn budget_by_status(&mut self) -> Result<Vec<(ProjectStatus, Decimal)>> {
        let rows = sqlx::query_as::<_, (ProjectStatus, Decimal)>(
            "SELECT status, COALESCE(SUM(total_budget), 0) FROM projects GROUP BY status",
        )
        .fetch_all(&mut *self)
        .await?;
        Ok(rows)
    }

    async fn average_completed_duration_days(&mut self) -> Result<Option<f64>> {
        let average = sqlx::query_scalar::<_, Option<f64>>(
            r#"
            SELECT AVG(actual_end_date - start_date)::FLOAT8
            FROM projects
            WHERE status = 'COMPLETED' AND actual_end_date IS NOT NULL
            "#,
        )
        .fetch_one(&mut *self)
        .await?;
        Ok(average)
    }

    async fn count_distinct_staff(&mut self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT member_id) FROM project_staff",
        )
        .fetch_one(&mut *self)
        .await?;
        Ok(count)
    }
}
