use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn allocation(context: impl Into<String>, source: TryReserveError) -> Error {
        Error(
            ErrorKind::AllocationFailed {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    pub fn capacity_exceeded(context: impl Into<String>, limit: usize) -> Error {
        Error(
            ErrorKind::CapacityExceeded {
                context: context.into(),
                limit,
            }
            .into(),
        )
    }

    pub fn index_out_of_bounds(index: usize, len: usize) -> Error {
        Error(ErrorKind::IndexOutOfBounds { index, len }.into())
    }

    /// Returns `true` if the error was caused by a failed memory reservation.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self.kind(), ErrorKind::AllocationFailed { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("memory allocation failed for '{context}': {source}")]
    AllocationFailed {
        context: String,
        source: TryReserveError,
    },

    #[error("capacity of '{context}' exceeded (limit {limit})")]
    CapacityExceeded { context: String, limit: usize },

    #[error("index {index} is out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<TryReserveError> for Error {
    fn from(e: TryReserveError) -> Self {
        Error::allocation("", e)
    }
}

impl From<std::convert::Infallible> for Error {
    fn from(e: std::convert::Infallible) -> Self {
        match e {}
    }
}
