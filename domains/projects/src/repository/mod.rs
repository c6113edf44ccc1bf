//! Repository implementations for the projects domain

pub mod projects;
pub mod store;

use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres, Transaction};

pub use projects::{ProjectFilter, ProjectRepository};

/// Combined repository access for the projects domain
#[derive(Clone)]
pub struct ProjectsRepositories {
    pool: PgPool,
    pub projects: ProjectRepository,
}

impl ProjectsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            projects: ProjectRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a new database transaction.
    ///
    /// Lifecycle writes run inside one so that the allocation checks and the
    /// write they guard commit together.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Acquire a pooled connection for read-only work.
    pub async fn acquire(&self) -> std::result::Result<PoolConnection<Postgres>, sqlx::Error> {
        self.pool.acquire().await
    }
}
