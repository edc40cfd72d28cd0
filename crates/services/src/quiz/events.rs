use quiz_core::model::Question;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::LoadError;

/// Everything the controller reacts to, in arrival order.
///
/// Completions of work the controller started carry the epoch they were started in so
/// results that outlive a reset can be recognised and dropped.
#[derive(Debug)]
pub(crate) enum QuizEvent {
    Answer(bool),
    Restart,
    Retry,
    DataLoaded {
        epoch: u64,
        result: Result<(), LoadError>,
    },
    QuestionDelivered {
        epoch: u64,
        result: Result<Option<Question>, LoadError>,
    },
    TransitionElapsed {
        epoch: u64,
    },
}

/// Cloneable handle the presentation side uses to talk to a running controller.
#[derive(Clone, Debug)]
pub struct QuizHandle {
    tx: mpsc::UnboundedSender<QuizEvent>,
}

impl QuizHandle {
    pub(crate) fn new(tx: mpsc::UnboundedSender<QuizEvent>) -> Self {
        Self { tx }
    }

    /// The player pressed "yes" (`true`) or "no" (`false`).
    pub fn answer(&self, answer: bool) {
        self.post(QuizEvent::Answer(answer));
    }

    /// The player dismissed the round result (or abandoned the round).
    pub fn restart(&self) {
        self.post(QuizEvent::Restart);
    }

    /// The player dismissed a load error.
    pub fn retry(&self) {
        self.post(QuizEvent::Retry);
    }

    /// True once the controller has stopped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn post(&self, event: QuizEvent) {
        if self.tx.send(event).is_err() {
            debug!("quiz controller stopped, dropping event");
        }
    }
}

/// Handles are equal when they talk to the same controller.
impl PartialEq for QuizHandle {
    fn eq(&self, other: &Self) -> bool {
        self.tx.same_channel(&other.tx)
    }
}
