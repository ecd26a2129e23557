//! Repository for the `projects` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::project::{CreateProject, ProjectRecord, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, payload, saved_at, created_at";

/// CRUD operations for saved projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<ProjectRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (user_id, name, payload)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRecord>(&query)
            .bind(&input.user_id)
            .bind(&input.name)
            .bind(&input.payload)
            .fetch_one(pool)
            .await
    }

    /// Overwrite an existing project's snapshot, refreshing `saved_at`.
    ///
    /// Scoped to the owning user; returns `None` when no such row exists.
    pub async fn update(
        pool: &PgPool,
        user_id: &str,
        id: Uuid,
        input: &UpdateProject,
    ) -> Result<Option<ProjectRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE projects
             SET name = $3, payload = $4, saved_at = now()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRecord>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.payload)
            .fetch_optional(pool)
            .await
    }

    /// List a user's projects, most recently saved first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<ProjectRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE user_id = $1
             ORDER BY saved_at DESC"
        );
        sqlx::query_as::<_, ProjectRecord>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch one project by id, scoped to the owning user.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: &str,
        id: Uuid,
    ) -> Result<Option<ProjectRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, ProjectRecord>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete one project. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, user_id: &str, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
