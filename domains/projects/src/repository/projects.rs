//! Project listing queries

use portfolio_common::{Page, Pagination, Result};
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::store::PROJECT_COLUMNS;
use crate::domain::entities::{ProjectStatus, ProjectWithManager};

/// A single criterion for listing projects
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProjectFilter {
    #[default]
    All,
    /// Case-insensitive substring of the name
    NameContains(String),
    Status(ProjectStatus),
    Manager(Uuid),
    /// Projects the member is staffed on
    Staff(Uuid),
}

impl ProjectFilter {
    /// SQL condition for this filter, reading its value from `$placeholder`
    fn condition(&self, placeholder: usize) -> String {
        match self {
            ProjectFilter::All => "TRUE".to_string(),
            ProjectFilter::NameContains(_) => {
                format!("p.name ILIKE '%' || ${placeholder} || '%'")
            }
            ProjectFilter::Status(_) => format!("p.status = ${placeholder}"),
            ProjectFilter::Manager(_) => format!("p.manager_id = ${placeholder}"),
            ProjectFilter::Staff(_) => format!(
                "EXISTS (SELECT 1 FROM project_staff f \
                 WHERE f.project_id = p.id AND f.member_id = ${placeholder})"
            ),
        }
    }

    fn bind<'q, O>(
        &self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        match self {
            ProjectFilter::All => query,
            ProjectFilter::NameContains(fragment) => query.bind(escape_like(fragment)),
            ProjectFilter::Status(status) => query.bind(*status),
            ProjectFilter::Manager(id) | ProjectFilter::Staff(id) => query.bind(*id),
        }
    }
}

/// Escape LIKE wildcards so the fragment matches literally
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Read-only project queries over the pool
#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List one page of projects matching `filter`, newest first
    pub async fn list(
        &self,
        filter: &ProjectFilter,
        pagination: &Pagination,
    ) -> Result<Page<ProjectWithManager>> {
        let list_query = format!(
            "SELECT {PROJECT_COLUMNS}, m.name AS manager_name \
             FROM projects p \
             JOIN members m ON m.id = p.manager_id \
             WHERE {} \
             ORDER BY p.created_at DESC, p.id ASC \
             LIMIT $1 OFFSET $2",
            filter.condition(3)
        );
        let items = filter
            .bind(
                sqlx::query_as::<_, ProjectWithManager>(&list_query)
                    .bind(pagination.limit())
                    .bind(pagination.offset()),
            )
            .fetch_all(&self.pool)
            .await?;

        let count_query = format!(
            "SELECT COUNT(*) FROM projects p WHERE {}",
            filter.condition(1)
        );
        let (total,) = filter
            .bind(sqlx::query_as::<_, (i64,)>(&count_query))
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(items, total, pagination))
    }
}
