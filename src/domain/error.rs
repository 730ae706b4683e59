//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

/// Domain errors represent outline shape violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid outline {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("outline has no root node: {0}")]
    EmptyOutline(PathBuf),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
