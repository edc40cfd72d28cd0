use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::LoadError;

const DEFAULT_BASE_URL: &str = "https://tv-api.com/en/API";

#[derive(Clone, Debug)]
pub struct MoviesApiConfig {
    pub base_url: String,
    pub api_key: String,
}

impl MoviesApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Config for the public endpoint.
    #[must_use]
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self::new(DEFAULT_BASE_URL, api_key)
    }

    /// Read `MOVIEQUIZ_API_KEY` and optionally `MOVIEQUIZ_API_BASE_URL`.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("MOVIEQUIZ_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("MOVIEQUIZ_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Some(Self { base_url, api_key })
    }

    fn top_movies_url(&self) -> String {
        format!(
            "{}/Top250Movies/{}",
            self.base_url.trim_end_matches('/'),
            self.api_key
        )
    }
}

/// Response body of the top-movies endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct MovieList {
    #[serde(rename = "errorMessage", default)]
    pub error_message: String,
    #[serde(default)]
    pub items: Vec<Movie>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Movie {
    #[serde(rename = "fullTitle", default)]
    pub title: String,
    #[serde(rename = "imDbRating", default)]
    pub rating: String,
    #[serde(rename = "image")]
    pub image_url: String,
}

impl Movie {
    /// Poster URL rewritten to a 600px-wide rendition.
    #[must_use]
    pub fn resized_image_url(&self) -> String {
        match self.image_url.split_once("._") {
            Some((stem, _)) => format!("{stem}._V0_UX600_.jpg"),
            None => self.image_url.clone(),
        }
    }

    /// Parsed rating; missing or malformed ratings count as zero.
    #[must_use]
    pub fn rating_value(&self) -> f32 {
        self.rating.trim().parse().unwrap_or(0.0)
    }
}

/// Fetches the raw movie list and poster bytes.
#[async_trait]
pub trait MoviesLoading: Send + Sync {
    /// # Errors
    ///
    /// Returns `LoadError` for transport failures or non-success responses.
    async fn load_movies(&self) -> Result<MovieList, LoadError>;

    /// # Errors
    ///
    /// Returns `LoadError` for transport failures or non-success responses.
    async fn load_image(&self, url: &str) -> Result<Vec<u8>, LoadError>;
}

#[derive(Clone)]
pub struct HttpMoviesLoader {
    client: Client,
    config: MoviesApiConfig,
}

impl HttpMoviesLoader {
    #[must_use]
    pub fn new(config: MoviesApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl MoviesLoading for HttpMoviesLoader {
    async fn load_movies(&self) -> Result<MovieList, LoadError> {
        let response = self.client.get(self.config.top_movies_url()).send().await?;
        if !response.status().is_success() {
            return Err(LoadError::HttpStatus(response.status()));
        }
        Ok(response.json().await?)
    }

    async fn load_image(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(LoadError::HttpStatus(response.status()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}
