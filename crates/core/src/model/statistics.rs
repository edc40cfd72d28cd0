use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::GameRecord;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum StatisticsError {
    #[error("accuracy must be within 0..=1, got {0}")]
    AccuracyOutOfRange(f64),
}

/// Lifetime performance across completed rounds.
///
/// `total_accuracy` is the mean of per-round accuracies, not a pooled ratio: every
/// round contributes one sample whatever its length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateStatistics {
    games_played: u32,
    best_game: GameRecord,
    total_accuracy: f64,
}

impl AggregateStatistics {
    /// Statistics for a player with no completed rounds.
    #[must_use]
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            games_played: 0,
            best_game: GameRecord::zero(now),
            total_accuracy: 0.0,
        }
    }

    /// Rehydrate statistics from storage.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsError::AccuracyOutOfRange` if `total_accuracy` is not a finite
    /// value in `0..=1`.
    pub fn from_persisted(
        games_played: u32,
        best_game: GameRecord,
        total_accuracy: f64,
    ) -> Result<Self, StatisticsError> {
        if !(0.0..=1.0).contains(&total_accuracy) {
            return Err(StatisticsError::AccuracyOutOfRange(total_accuracy));
        }
        Ok(Self {
            games_played,
            best_game,
            total_accuracy,
        })
    }

    /// Fold one round outcome into the aggregate.
    #[must_use]
    pub fn record(&self, outcome: GameRecord) -> Self {
        let sample = outcome.accuracy();
        let total_accuracy = if self.games_played == 0 {
            sample
        } else {
            let played = f64::from(self.games_played);
            (self.total_accuracy * played + sample) / (played + 1.0)
        };
        let best_game = if outcome.is_better_than(&self.best_game) {
            outcome
        } else {
            self.best_game
        };

        Self {
            games_played: self.games_played.saturating_add(1),
            best_game,
            total_accuracy,
        }
    }

    #[must_use]
    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    #[must_use]
    pub fn best_game(&self) -> GameRecord {
        self.best_game
    }

    /// Mean per-round accuracy in `0..=1`.
    #[must_use]
    pub fn total_accuracy(&self) -> f64 {
        self.total_accuracy
    }

    #[must_use]
    pub fn accuracy_percent(&self) -> f64 {
        self.total_accuracy * 100.0
    }
}
