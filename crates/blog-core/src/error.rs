//! Domain-level error types.

use thiserror::Error;

use crate::domain::PostId;

/// Coarse classification of a [`DomainError`].
///
/// Transports map kinds, never individual variants, onto their own codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    AlreadyExists,
    Unexpected,
}

/// Domain errors - business logic failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("Post tags must not contain null (element {index}).")]
    NullTag { index: usize },

    #[error("Search term not specified.")]
    MissingTerm,

    #[error("Post with Id = {id} already exists.")]
    AlreadyExists { id: PostId },

    #[error("Post with Id = {id} not found.")]
    NotFound { id: PostId },

    #[error("Post with Id = {id} is deleted.")]
    Conflict { id: PostId },

    #[error("{0}")]
    Unexpected(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::NullTag { .. } | Self::MissingTerm => ErrorKind::Validation,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Stored record could not be decoded: {0}")]
    Decode(String),

    /// Insert-if-absent found an existing record.
    #[error("Record {0} already exists")]
    Duplicate(PostId),

    #[error("Record {0} does not exist")]
    Missing(PostId),

    /// Compare-and-swap rejected: the record was soft-deleted in the meantime.
    #[error("Record {0} was soft-deleted concurrently")]
    Stale(PostId),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(id) => DomainError::AlreadyExists { id },
            RepoError::Missing(id) => DomainError::NotFound { id },
            RepoError::Stale(id) => DomainError::Conflict { id },
            other => DomainError::Unexpected(other.to_string()),
        }
    }
}
