//! Project snapshot persistence.
//!
//! One Postgres table, one opaque JSON document per saved project.
//! Persistence is best-effort from the studio's point of view: a store
//! failure surfaces as a transient save status and never corrupts the
//! in-memory session.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub use models::project::{CreateProject, ProjectRecord, UpdateProject};
pub use repositories::ProjectRepo;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
