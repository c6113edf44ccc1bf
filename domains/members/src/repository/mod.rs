//! Repository implementations for the members domain

pub mod members;

use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres, Transaction};

pub use members::MEMBER_COLUMNS;

/// Combined repository access for the members domain
///
/// The store traits are implemented on `PgConnection`, so callers either
/// acquire a pooled connection for reads or begin a transaction for writes.
#[derive(Clone)]
pub struct MembersRepositories {
    pool: PgPool,
}

impl MembersRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a new database transaction.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Acquire a pooled connection for read-only work.
    pub async fn acquire(&self) -> std::result::Result<PoolConnection<Postgres>, sqlx::Error> {
        self.pool.acquire().await
    }
}
