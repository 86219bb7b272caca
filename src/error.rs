use thiserror::Error;

use crate::models::FieldErrors;

/// The persisted review collection could not be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("stored reviews under `{key}` are corrupted: {reason}")]
    Corrupted { key: String, reason: String },

    #[error("stored reviews under `{key}` could not be read: {reason}")]
    Unavailable { key: String, reason: String },
}

/// Why a review submission did not produce a new collection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("review rejected: {0}")]
    Invalid(FieldErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SubmitError {
    /// Field errors to show inline, if this was a validation rejection
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            SubmitError::Invalid(errors) => Some(errors),
            SubmitError::Store(_) => None,
        }
    }
}

impl From<FieldErrors> for SubmitError {
    fn from(errors: FieldErrors) -> Self {
        SubmitError::Invalid(errors)
    }
}
