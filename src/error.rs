use thiserror::Error;

use crate::{ast::ResultKind, backend::RemoteOperation};

/// Error type returned by backend operations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort a dispatch.
///
/// Everything except [`DispatchError::Backend`] is raised before anything is
/// submitted to the backend.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The backend cannot deliver a format compatible with the requested
    /// result
    #[error("{kind} is not supported by {backend}")]
    UnsupportedFormat { kind: ResultKind, backend: String },

    /// The terminal node cannot be rewritten because it does not carry
    /// exactly a stream and a column selection
    #[error(
        "do not understand how to call {kind} - wrong number of arguments (expected 2, found {found})"
    )]
    Arity { kind: ResultKind, found: usize },

    /// No remote operation is registered for the result kind
    #[error("internal error - asked for {kind} - but this dataset does not support it")]
    InternalDispatch { kind: ResultKind },

    /// The remote operation itself failed
    #[error("remote operation {operation} failed")]
    Backend {
        operation: RemoteOperation,
        #[source]
        source: BoxError,
    },
}
