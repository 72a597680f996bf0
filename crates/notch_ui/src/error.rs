//! Error types for handle operations.

use thiserror::Error;

use crate::environment::ElementId;

/// Errors that can occur while driving a handle against its environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    /// A capability was used after the handle it refers to was torn down
    #[error("handle is not mounted")]
    NotMounted,

    /// The environment has no element with this id
    #[error("unknown element: {0}")]
    UnknownElement(ElementId),

    /// The platform rejected the operation
    #[error("environment error: {0}")]
    Environment(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HandleError>;
