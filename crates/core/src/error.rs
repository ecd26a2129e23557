use crate::types::ItemIndex;

/// Domain-level error type shared across the workspace.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A user-correctable rule violation. The message is shown verbatim
    /// to the user, so every call site supplies a specific one.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An entity addressed by index does not exist.
    #[error("Entity not found: {entity} at index {index}")]
    NotFound {
        entity: &'static str,
        index: ItemIndex,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
