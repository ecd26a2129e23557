//! Rows of the `projects` table.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use pictura_core::project::ProjectSnapshot;

/// One saved project row. The snapshot itself is an opaque JSON
/// document in `payload`; `name` and `saved_at` are lifted out for
/// listing without deserializing every snapshot.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub payload: serde_json::Value,
    pub saved_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl ProjectRecord {
    /// Decode the stored snapshot, stamping in the row's identity and
    /// save time.
    pub fn snapshot(&self) -> Result<ProjectSnapshot, serde_json::Error> {
        let mut snapshot: ProjectSnapshot = serde_json::from_value(self.payload.clone())?;
        snapshot.id = Some(self.id.to_string());
        snapshot.name = self.name.clone();
        snapshot.saved_at = Some(self.saved_at);
        Ok(snapshot)
    }
}

/// Input for inserting a new project.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub user_id: String,
    pub name: String,
    pub payload: serde_json::Value,
}

impl CreateProject {
    pub fn from_snapshot(
        user_id: &str,
        snapshot: &ProjectSnapshot,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            user_id: user_id.to_string(),
            name: snapshot.name.clone(),
            payload: serde_json::to_value(snapshot)?,
        })
    }
}

/// Input for updating an existing project in place.
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub name: String,
    pub payload: serde_json::Value,
}

impl UpdateProject {
    pub fn from_snapshot(snapshot: &ProjectSnapshot) -> Result<Self, serde_json::Error> {
        Ok(Self {
            name: snapshot.name.clone(),
            payload: serde_json::to_value(snapshot)?,
        })
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
