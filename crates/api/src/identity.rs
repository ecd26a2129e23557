//! Session identity.
//!
//! The identity provider is external; the studio only needs a stable
//! user id to scope saved projects. Without a provisioned id the server
//! runs under a generated anonymous identity.

use uuid::Uuid;

/// The resolved identity of this server's single session.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
}

impl Identity {
    /// Resolve the user id from `PICTURA_USER_ID`, or mint an anonymous
    /// one.
    pub fn resolve() -> Self {
        let user_id = match std::env::var("PICTURA_USER_ID") {
            Ok(id) if !id.trim().is_empty() => id,
            _ => {
                let anonymous = Uuid::new_v4().to_string();
                tracing::info!(user_id = %anonymous, "No provisioned identity; using anonymous id");
                anonymous
            }
        };
        Self { user_id }
    }
}
