mod factory;
mod movies;

use async_trait::async_trait;
use quiz_core::model::Question;

use crate::error::LoadError;

pub use factory::{DEFAULT_RATING_THRESHOLD, MovieQuestionFactory};
pub use movies::{HttpMoviesLoader, Movie, MovieList, MoviesApiConfig, MoviesLoading};

/// Supplies questions to a quiz session.
///
/// `load_all` is called once before the first `request_next`, and again after the
/// player retries a failed load. Callers keep at most one `request_next` in flight.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch whatever bulk data the source needs.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` when the data cannot be fetched.
    async fn load_all(&self) -> Result<(), LoadError>;

    /// Produce the next question, or `None` when there is nothing to ask.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` when the question content cannot be fetched.
    async fn request_next(&self) -> Result<Option<Question>, LoadError>;
}
