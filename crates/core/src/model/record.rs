use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordError {
    #[error("correct answers ({correct}) exceed total ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },
}

/// Outcome of one completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    correct: u32,
    total: u32,
    date: DateTime<Utc>,
}

impl GameRecord {
    /// # Errors
    ///
    /// Returns `RecordError::CorrectExceedsTotal` if `correct > total`.
    pub fn new(correct: u32, total: u32, date: DateTime<Utc>) -> Result<Self, RecordError> {
        if correct > total {
            return Err(RecordError::CorrectExceedsTotal { correct, total });
        }
        Ok(Self {
            correct,
            total,
            date,
        })
    }

    /// The `0/0` placeholder used before any round was played.
    #[must_use]
    pub fn zero(date: DateTime<Utc>) -> Self {
        Self {
            correct: 0,
            total: 0,
            date,
        }
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.total == 0
    }

    /// `correct / total`, with `0/0` counted as 0.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.correct) / f64::from(self.total)
    }

    /// Strictly higher accuracy wins; ties are not improvements.
    ///
    /// Any real record beats the `0/0` placeholder, even `0/n`.
    #[must_use]
    pub fn is_better_than(&self, other: &GameRecord) -> bool {
        if other.is_zero() {
            return !self.is_zero();
        }
        self.accuracy() > other.accuracy()
    }
}
