//! Commands the quiz controller sends to whatever renders it.
//!
//! The controller never touches the UI directly: it pushes `PresentationCommand`s into
//! a channel and the presentation side drains that channel on its own context.

use quiz_core::model::{AggregateStatistics, GameRecord, Question, RoundState};
use tokio::sync::mpsc;
use tracing::debug;

const RECORD_DATE_FORMAT: &str = "%d.%m.%y %H:%M";

/// One question converted for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizStep {
    pub image: Vec<u8>,
    pub question: String,
    /// Counter label, e.g. `1/10`.
    pub question_number: String,
}

impl QuizStep {
    #[must_use]
    pub fn convert(question: &Question, round: &RoundState) -> Self {
        Self {
            image: question.image().to_vec(),
            question: question.text().to_string(),
            question_number: round.question_number(),
        }
    }
}

/// What the alert's single button does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertAction {
    Restart,
    Retry,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertModel {
    pub title: String,
    pub message: String,
    pub button_text: String,
    pub action: AlertAction,
}

impl AlertModel {
    #[must_use]
    pub fn round_result(summary: &RoundSummary) -> Self {
        Self {
            title: "This round is over!".into(),
            message: summary.text(),
            button_text: "Play again".into(),
            action: AlertAction::Restart,
        }
    }

    #[must_use]
    pub fn load_error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".into(),
            message: message.into(),
            button_text: "Try again".into(),
            action: AlertAction::Retry,
        }
    }
}

/// End-of-round report: this round plus lifetime statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundSummary {
    pub score: u32,
    pub total: u32,
    pub games_played: u32,
    pub best_game: GameRecord,
    /// Mean per-round accuracy in `0..=1`.
    pub accuracy: f64,
}

impl RoundSummary {
    #[must_use]
    pub fn new(round: &RoundState, stats: &AggregateStatistics) -> Self {
        Self {
            score: round.score(),
            total: round.total(),
            games_played: stats.games_played(),
            best_game: stats.best_game(),
            accuracy: stats.total_accuracy(),
        }
    }

    /// Accuracy as a percentage with two decimals, e.g. `70.00%`.
    #[must_use]
    pub fn accuracy_label(&self) -> String {
        format!("{:.2}%", self.accuracy * 100.0)
    }

    #[must_use]
    pub fn text(&self) -> String {
        let best = &self.best_game;
        format!(
            "Your result: {}/{}\nQuizzes played: {}\nRecord: {}/{} ({})\nAverage accuracy: {}",
            self.score,
            self.total,
            self.games_played,
            best.correct(),
            best.total(),
            best.date().format(RECORD_DATE_FORMAT),
            self.accuracy_label(),
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PresentationCommand {
    /// Show or hide the activity indicator.
    SetLoading(bool),
    ShowQuestion(QuizStep),
    /// Highlight the poster green or red.
    ShowFeedback { is_correct: bool },
    ClearFeedback,
    SetInputEnabled(bool),
    ShowRoundResult {
        summary: RoundSummary,
        alert: AlertModel,
    },
    ShowError(AlertModel),
}

/// Controller-side end of the presentation channel.
#[derive(Clone, Debug)]
pub(crate) struct Presenter {
    tx: mpsc::UnboundedSender<PresentationCommand>,
}

impl Presenter {
    pub(crate) fn new(tx: mpsc::UnboundedSender<PresentationCommand>) -> Self {
        Self { tx }
    }

    pub(crate) fn send(&self, command: PresentationCommand) {
        if self.tx.send(command).is_err() {
            debug!("presentation sink closed, dropping command");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    #[test]
    fn converts_question_for_display() {
        let round = RoundState::new(10).unwrap();
        let question = Question::new(Vec::new(), "Question Text", true);

        let step = QuizStep::convert(&question, &round);

        assert!(step.image.is_empty());
        assert_eq!(step.question, "Question Text");
        assert_eq!(step.question_number, "1/10");
    }

    #[test]
    fn summary_text_lists_round_and_lifetime_stats() {
        let best = GameRecord::new(8, 10, fixed_now()).unwrap();
        let summary = RoundSummary {
            score: 6,
            total: 10,
            games_played: 2,
            best_game: best,
            accuracy: 0.7,
        };

        assert_eq!(
            summary.text(),
            "Your result: 6/10\nQuizzes played: 2\nRecord: 8/10 (14.11.23 22:13)\nAverage accuracy: 70.00%"
        );
    }

    #[test]
    fn accuracy_label_rounds_to_two_decimals() {
        let summary = RoundSummary {
            score: 2,
            total: 3,
            games_played: 1,
            best_game: GameRecord::new(2, 3, fixed_now()).unwrap(),
            accuracy: 2.0 / 3.0,
        };
        assert_eq!(summary.accuracy_label(), "66.67%");
    }

    #[test]
    fn alerts_carry_their_action() {
        assert_eq!(AlertModel::load_error("offline").action, AlertAction::Retry);
        assert_eq!(AlertModel::load_error("offline").message, "offline");
    }
}
