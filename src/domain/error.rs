//! Domain-level errors (no external dependencies)

use std::io;

use thiserror::Error;

/// Domain errors represent rejected tree operations.
/// None of them are fatal: the tree is left unchanged.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("'{0}' not found")]
    NotFound(String),

    #[error("'{child}' is already a child of '{parent}'.")]
    AlreadyChild { parent: String, child: String },

    #[error("'{parent}' is not in the tree and '{child}' is not the root.")]
    NotInTree { parent: String, child: String },

    #[error("no child given for '{0}'")]
    MissingChild(String),

    #[error("cannot write tree: {0}")]
    Output(#[from] io::Error),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
