//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::SkillPath;

/// Domain errors represent violations of the tree structure or caller preconditions.
/// No domain operation mutates the tree before returning one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("invalid path {path}: must start at the root marker 0")]
    InvalidPath { path: SkillPath },

    #[error("path {path} out of bounds at depth {depth}: index {index}, {len} children")]
    PathOutOfBounds {
        path: SkillPath,
        depth: usize,
        index: usize,
        len: usize,
    },

    #[error("path {path} too long: reached a leaf skill at depth {depth} with indices left")]
    PathTooLong { path: SkillPath, depth: usize },

    #[error("criterion must contain exactly one key, found {found}")]
    MultipleKeys { found: usize },

    #[error("no skill with {key} = {value}")]
    NotFound { key: String, value: String },

    #[error("malformed path: {0}")]
    MalformedPath(String),

    #[error("malformed criterion: {0}")]
    MalformedCriterion(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
