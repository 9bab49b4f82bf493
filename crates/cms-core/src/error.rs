//! Domain errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Menu node not found: {0}")]
    MenuNodeNotFound(Uuid),

    #[error("Actor not found: {0}")]
    ActorNotFound(Uuid),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Menu node {0} still has children")]
    MenuHasChildren(Uuid),

    #[error("A menu node may define a link or a document, not both")]
    ConflictingTarget,

    #[error("Invalid link: {0}")]
    InvalidLink(String),

    #[error("Invalid parent: {0}")]
    InvalidParent(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
