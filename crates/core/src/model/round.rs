use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundError {
    #[error("a round needs at least one question")]
    EmptyRound,

    #[error("round is already on its last question")]
    PastLastQuestion,
}

/// Progress through a fixed-length round.
///
/// `index` is the zero-based question being shown, `score` counts correct answers so far.
/// `score <= index + 1 <= total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundState {
    index: u32,
    score: u32,
    total: u32,
}

impl RoundState {
    /// Start a round of `total` questions.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::EmptyRound` if `total` is zero.
    pub fn new(total: u32) -> Result<Self, RoundError> {
        if total == 0 {
            return Err(RoundError::EmptyRound);
        }
        Ok(Self {
            index: 0,
            score: 0,
            total,
        })
    }

    #[must_use]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.index + 1 == self.total
    }

    /// Count the answer given to the current question.
    pub fn record_answer(&mut self, is_correct: bool) {
        if is_correct {
            self.score = self.score.saturating_add(1).min(self.index + 1);
        }
    }

    /// Move to the next question.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::PastLastQuestion` when already on the last question.
    pub fn advance(&mut self) -> Result<(), RoundError> {
        if self.is_last_question() {
            return Err(RoundError::PastLastQuestion);
        }
        self.index += 1;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.score = 0;
    }

    /// Counter label such as `3/10`.
    #[must_use]
    pub fn question_number(&self) -> String {
        format!("{}/{}", self.index + 1, self.total)
    }
}
