use thiserror::Error;

/// Recipe resolution failures; both are scoped to one machine
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("recipe for machine {machine} not found at {path}")]
    NotFound { machine: String, path: String },

    #[error("recipe for machine {machine} is unreadable: {reason}")]
    Unreadable { machine: String, reason: String },
}
