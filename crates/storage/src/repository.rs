use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{AggregateStatistics, GameRecord};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for lifetime statistics.
///
/// Flattens the best game so backends can store it as plain columns.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsRecord {
    pub games_played: u32,
    pub total_accuracy: f64,
    pub best_correct: u32,
    pub best_total: u32,
    pub best_played_at: DateTime<Utc>,
}

impl StatisticsRecord {
    #[must_use]
    pub fn from_statistics(stats: &AggregateStatistics) -> Self {
        let best = stats.best_game();
        Self {
            games_played: stats.games_played(),
            total_accuracy: stats.total_accuracy(),
            best_correct: best.correct(),
            best_total: best.total(),
            best_played_at: best.date(),
        }
    }

    /// Convert the record back into domain statistics.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored values violate domain rules.
    pub fn into_statistics(self) -> Result<AggregateStatistics, StorageError> {
        let best_game = GameRecord::new(self.best_correct, self.best_total, self.best_played_at)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        AggregateStatistics::from_persisted(self.games_played, best_game, self.total_accuracy)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

/// Durable key/value home of the lifetime statistics.
///
/// Writes replace the whole aggregate at once; readers never observe a partial update.
#[async_trait]
pub trait StatisticsRepository: Send + Sync {
    /// Fetch stored statistics, `None` if nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read or holds invalid data.
    async fn get_statistics(&self) -> Result<Option<AggregateStatistics>, StorageError>;

    /// Persist statistics, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn save_statistics(&self, stats: &AggregateStatistics) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    statistics: Arc<Mutex<Option<StatisticsRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatisticsRepository for InMemoryRepository {
    async fn get_statistics(&self) -> Result<Option<AggregateStatistics>, StorageError> {
        let guard = self
            .statistics
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.clone().map(StatisticsRecord::into_statistics).transpose()
    }

    async fn save_statistics(&self, stats: &AggregateStatistics) -> Result<(), StorageError> {
        let mut guard = self
            .statistics
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(StatisticsRecord::from_statistics(stats));
        Ok(())
    }
}

/// Repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub statistics: Arc<dyn StatisticsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let statistics: Arc<dyn StatisticsRepository> = Arc::new(InMemoryRepository::new());
        Self { statistics }
    }
}
