use std::time::Duration;

use crate::model::RoundError;

/// Number of questions in a round unless configured otherwise.
pub const DEFAULT_ROUND_LENGTH: u32 = 10;

/// Time between answering a question and moving on.
pub const DEFAULT_TRANSITION_DELAY: Duration = Duration::from_secs(1);

/// Round parameters fixed for the lifetime of a session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfig {
    round_length: u32,
    transition_delay: Duration,
}

impl QuizConfig {
    /// Build a configuration.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::EmptyRound` if `round_length` is zero.
    pub fn new(round_length: u32, transition_delay: Duration) -> Result<Self, RoundError> {
        if round_length == 0 {
            return Err(RoundError::EmptyRound);
        }
        Ok(Self {
            round_length,
            transition_delay,
        })
    }

    #[must_use]
    pub fn round_length(&self) -> u32 {
        self.round_length
    }

    #[must_use]
    pub fn transition_delay(&self) -> Duration {
        self.transition_delay
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            round_length: DEFAULT_ROUND_LENGTH,
            transition_delay: DEFAULT_TRANSITION_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_ten_questions_one_second_apart() {
        let config = QuizConfig::default();
        assert_eq!(config.round_length(), 10);
        assert_eq!(config.transition_delay(), Duration::from_secs(1));
    }

    #[test]
    fn rejects_empty_round() {
        let err = QuizConfig::new(0, Duration::from_millis(10)).unwrap_err();
        assert_eq!(err, RoundError::EmptyRound);
    }
}
