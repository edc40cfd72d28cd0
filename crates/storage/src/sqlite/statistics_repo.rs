use async_trait::async_trait;
use quiz_core::model::AggregateStatistics;

use super::SqliteRepository;
use super::mapping::map_statistics_row;
use crate::repository::{StatisticsRecord, StatisticsRepository, StorageError};

#[async_trait]
impl StatisticsRepository for SqliteRepository {
    async fn get_statistics(&self) -> Result<Option<AggregateStatistics>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT
                games_played,
                total_accuracy,
                best_correct,
                best_total,
                best_played_at
            FROM quiz_statistics
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        map_statistics_row(&row)?.into_statistics().map(Some)
    }

    async fn save_statistics(&self, stats: &AggregateStatistics) -> Result<(), StorageError> {
        let record = StatisticsRecord::from_statistics(stats);

        // One upsert: readers see the old row or the new one, nothing in between.
        sqlx::query(
            r"
            INSERT INTO quiz_statistics (
                id,
                games_played,
                total_accuracy,
                best_correct,
                best_total,
                best_played_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                games_played = excluded.games_played,
                total_accuracy = excluded.total_accuracy,
                best_correct = excluded.best_correct,
                best_total = excluded.best_total,
                best_played_at = excluded.best_played_at
            ",
        )
        .bind(1_i64)
        .bind(i64::from(record.games_played))
        .bind(record.total_accuracy)
        .bind(i64::from(record.best_correct))
        .bind(i64::from(record.best_total))
        .bind(record.best_played_at)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
