//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{RecordError, RoundError};
use storage::repository::StorageError;

/// Reasons a question source could not deliver data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("movies service reported an error: {0}")]
    Api(String),
    #[error("movies service returned no movies")]
    Empty,
    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `StatisticsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatisticsServiceError {
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while building a quiz session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Round(#[from] RoundError),
}
