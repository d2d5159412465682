//! Crate-level error type.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result alias for fallible booking operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by booking entry points.
///
/// Only input validation is fatal. Failed slot queries and failed
/// submissions are absorbed or reported per assignment instead.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The request was rejected before any collaborator was contacted.
    #[error("invalid booking request: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),
}

impl Error {
    /// The validation errors behind this error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
        }
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(vec![err])
    }
}

impl From<Vec<ValidationError>> for Error {
    fn from(errors: Vec<ValidationError>) -> Self {
        Error::Validation(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
