/// Where a quiz session is in its round.
///
/// ```text
/// Loading ──question──▶ AwaitingAnswer ──answer──▶ Resolving ──delay──▶ Loading
///    ▲                                                  │
///    │                                                  └─last question─▶ RoundComplete
///    └──────────────── restart / retry ◀── Error ◀── load failure
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for bulk data or the next question.
    #[default]
    Loading,
    /// A question is on screen and input is enabled.
    AwaitingAnswer,
    /// Feedback is showing; the next step fires after the transition delay.
    Resolving,
    /// The result summary is showing.
    RoundComplete,
    /// A load failed; waiting for the player to retry.
    Error,
}

impl SessionPhase {
    #[must_use]
    pub fn accepts_answers(self) -> bool {
        matches!(self, SessionPhase::AwaitingAnswer)
    }

    #[must_use]
    pub fn accepts_questions(self) -> bool {
        matches!(self, SessionPhase::Loading)
    }
}
