use std::sync::Arc;

use quiz_core::model::{AggregateStatistics, GameRecord};
use storage::repository::StatisticsRepository;
use tokio::sync::Mutex;
use tracing::info;

use crate::Clock;
use crate::error::StatisticsServiceError;

/// Reads and updates lifetime statistics.
///
/// `record` holds a lock across its read-modify-write so two completions never
/// interleave.
pub struct StatisticsService {
    clock: Clock,
    repo: Arc<dyn StatisticsRepository>,
    write_lock: Mutex<()>,
}

impl StatisticsService {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn StatisticsRepository>) -> Self {
        Self {
            clock,
            repo,
            write_lock: Mutex::new(()),
        }
    }

    /// Load persisted statistics, or a fresh aggregate if none were saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsServiceError::Storage` if the repository read fails.
    pub async fn current(&self) -> Result<AggregateStatistics, StatisticsServiceError> {
        let stored = self.repo.get_statistics().await?;
        Ok(stored.unwrap_or_else(|| AggregateStatistics::fresh(self.clock.now())))
    }

    /// Fold a finished round into the lifetime statistics and persist them.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsServiceError::Record` for an impossible outcome and
    /// `StatisticsServiceError::Storage` if reading or writing fails.
    pub async fn record(
        &self,
        correct: u32,
        total: u32,
    ) -> Result<AggregateStatistics, StatisticsServiceError> {
        let _guard = self.write_lock.lock().await;

        let outcome = GameRecord::new(correct, total, self.clock.now())?;
        let updated = self.current().await?.record(outcome);
        self.repo.save_statistics(&updated).await?;

        info!(
            correct,
            total,
            games_played = updated.games_played(),
            accuracy = updated.total_accuracy(),
            "round recorded"
        );
        Ok(updated)
    }
}
