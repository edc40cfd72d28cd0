use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use quiz_core::model::Question;
use rand::seq::IndexedRandom;
use tracing::debug;

use super::QuestionSource;
use super::movies::{Movie, MoviesLoading};
use crate::error::LoadError;

/// Rating a movie has to beat for "yes" to be the right answer.
pub const DEFAULT_RATING_THRESHOLD: f32 = 7.0;

/// Builds rating questions from a loaded movie list.
pub struct MovieQuestionFactory {
    loader: Arc<dyn MoviesLoading>,
    movies: RwLock<Vec<Movie>>,
    threshold: f32,
}

impl MovieQuestionFactory {
    #[must_use]
    pub fn new(loader: Arc<dyn MoviesLoading>) -> Self {
        Self {
            loader,
            movies: RwLock::new(Vec::new()),
            threshold: DEFAULT_RATING_THRESHOLD,
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn movie_count(&self) -> usize {
        self.movies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn pick_movie(&self) -> Option<Movie> {
        let movies = self.movies.read().unwrap_or_else(PoisonError::into_inner);
        movies.choose(&mut rand::rng()).cloned()
    }
}

#[async_trait]
impl QuestionSource for MovieQuestionFactory {
    async fn load_all(&self) -> Result<(), LoadError> {
        let list = self.loader.load_movies().await?;
        if !list.error_message.is_empty() {
            return Err(LoadError::Api(list.error_message));
        }
        if list.items.is_empty() {
            return Err(LoadError::Empty);
        }

        debug!(count = list.items.len(), "movies loaded");
        *self.movies.write().unwrap_or_else(PoisonError::into_inner) = list.items;
        Ok(())
    }

    async fn request_next(&self) -> Result<Option<Question>, LoadError> {
        let Some(movie) = self.pick_movie() else {
            return Ok(None);
        };

        let image = self.loader.load_image(&movie.resized_image_url()).await?;
        let rating = movie.rating_value();
        let text = format!("Is this movie rated higher than {}?", self.threshold);

        debug!(title = %movie.title, rating, "question built");
        Ok(Some(Question::new(image, text, rating > self.threshold)))
    }
}
