//! What a flow hands back to its caller.
//!
//! By the time a caller sees a `FlowError` the user has already been told:
//! validation errors are meant to be shown inline next to the input, and
//! API errors have been turned into a status modal by the coordinator. The
//! value is only used to decide whether to keep a dialog open.

use thiserror::Error;

use crate::api::{ApiError, ErrorKind};
use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum FlowError {
    /// Rejected before any request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend or the network failed the request
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl FlowError {
    pub fn is_validation(&self) -> bool {
        matches!(self, FlowError::Validation(_))
    }

    /// Coarse category for API failures; `None` for validation errors.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            FlowError::Validation(_) => None,
            FlowError::Api(err) => Some(err.kind()),
        }
    }
}
