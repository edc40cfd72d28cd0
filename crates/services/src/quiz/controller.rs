use std::sync::Arc;

use quiz_core::QuizConfig;
use quiz_core::model::{AggregateStatistics, Question, RoundState};
use quiz_core::scoring::evaluate;
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

use super::events::{QuizEvent, QuizHandle};
use super::presentation::{AlertModel, PresentationCommand, Presenter, QuizStep, RoundSummary};
use super::state::SessionPhase;
use crate::Clock;
use crate::error::{LoadError, SessionError};
use crate::questions::QuestionSource;
use crate::statistics_service::StatisticsService;

/// Owns one player's round and drives it from events.
///
/// All transitions happen on the task running [`QuizController::run`], one event at a
/// time. Question fetches and the post-answer delay run as separate tasks that post
/// their completion back into the same queue, tagged with the current epoch. Resets
/// bump the epoch and abort those tasks, so anything that still arrives from before
/// the reset is ignored.
pub struct QuizController {
    config: QuizConfig,
    clock: Clock,
    source: Arc<dyn QuestionSource>,
    statistics: Arc<StatisticsService>,
    presenter: Presenter,
    inbox: mpsc::UnboundedReceiver<QuizEvent>,
    // Weak so the queue closes once every `QuizHandle` is gone.
    outbox: mpsc::WeakUnboundedSender<QuizEvent>,
    phase: SessionPhase,
    round: RoundState,
    current: Option<Arc<Question>>,
    epoch: u64,
    pending_fetch: Option<AbortHandle>,
    pending_transition: Option<AbortHandle>,
}

impl QuizController {
    /// Build a controller and the handle used to send it player input.
    ///
    /// Presentation commands are pushed into `presentation`; the receiving side is
    /// expected to apply them on its own update context.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Round` if the configured round length is invalid.
    pub fn new(
        config: QuizConfig,
        source: Arc<dyn QuestionSource>,
        statistics: Arc<StatisticsService>,
        presentation: mpsc::UnboundedSender<PresentationCommand>,
    ) -> Result<(Self, QuizHandle), SessionError> {
        let round = RoundState::new(config.round_length())?;
        let (tx, inbox) = mpsc::unbounded_channel();
        let outbox = tx.downgrade();

        let controller = Self {
            config,
            clock: Clock::system(),
            source,
            statistics,
            presenter: Presenter::new(presentation),
            inbox,
            outbox,
            phase: SessionPhase::Loading,
            round,
            current: None,
            epoch: 0,
            pending_fetch: None,
            pending_transition: None,
        };
        Ok((controller, QuizHandle::new(tx)))
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn round(&self) -> RoundState {
        self.round
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_deref()
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Run on the current task until every `QuizHandle` has been dropped.
    pub async fn run(mut self) {
        self.start();
        while let Some(event) = self.inbox.recv().await {
            self.handle(event).await;
        }
        debug!("quiz controller stopped");
    }

    /// Run on a new tokio task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    fn start(&mut self) {
        self.begin_loading();
        self.load_data();
    }

    pub(crate) async fn handle(&mut self, event: QuizEvent) {
        match event {
            QuizEvent::Answer(answer) => self.on_answer(answer),
            QuizEvent::Restart => self.on_restart(),
            QuizEvent::Retry => self.on_retry(),
            QuizEvent::DataLoaded { epoch, result } => self.on_data_loaded(epoch, result),
            QuizEvent::QuestionDelivered { epoch, result } => self.on_question(epoch, result),
            QuizEvent::TransitionElapsed { epoch } => self.on_transition(epoch).await,
        }
    }

    fn on_data_loaded(&mut self, epoch: u64, result: Result<(), LoadError>) {
        if epoch != self.epoch || !self.phase.accepts_questions() {
            debug!(epoch, current = self.epoch, "stale data load ignored");
            return;
        }
        self.pending_fetch = None;

        match result {
            Ok(()) => self.request_next(),
            Err(err) => self.fail(&err),
        }
    }

    fn on_question(&mut self, epoch: u64, result: Result<Option<Question>, LoadError>) {
        if epoch != self.epoch {
            debug!(epoch, current = self.epoch, "stale question ignored");
            return;
        }
        if !self.phase.accepts_questions() {
            debug!(phase = ?self.phase, "unsolicited question ignored");
            return;
        }
        self.pending_fetch = None;

        match result {
            Ok(Some(question)) => self.show_question(question),
            Ok(None) => debug!("source had no question, still loading"),
            Err(err) => self.fail(&err),
        }
    }

    fn show_question(&mut self, question: Question) {
        let step = QuizStep::convert(&question, &self.round);
        self.current = Some(Arc::new(question));
        self.phase = SessionPhase::AwaitingAnswer;
        debug!(question = %step.question_number, "awaiting answer");

        self.presenter.send(PresentationCommand::SetLoading(false));
        self.presenter.send(PresentationCommand::ShowQuestion(step));
        self.presenter.send(PresentationCommand::SetInputEnabled(true));
    }

    fn on_answer(&mut self, answer: bool) {
        if !self.phase.accepts_answers() {
            debug!(phase = ?self.phase, "answer ignored");
            return;
        }
        let Some(question) = self.current.as_deref() else {
            debug!("answer without a current question ignored");
            return;
        };

        let is_correct = evaluate(question, answer);
        self.round.record_answer(is_correct);
        self.phase = SessionPhase::Resolving;
        debug!(is_correct, score = self.round.score(), "answer resolved");

        self.presenter.send(PresentationCommand::SetInputEnabled(false));
        self.presenter
            .send(PresentationCommand::ShowFeedback { is_correct });
        self.schedule_transition();
    }

    async fn on_transition(&mut self, epoch: u64) {
        if epoch != self.epoch || self.phase != SessionPhase::Resolving {
            debug!(epoch, current = self.epoch, "stale transition ignored");
            return;
        }
        self.pending_transition = None;
        self.presenter.send(PresentationCommand::ClearFeedback);

        // Advancing fails only on the last question.
        match self.round.advance() {
            Ok(()) => {
                self.phase = SessionPhase::Loading;
                self.presenter.send(PresentationCommand::SetLoading(true));
                self.request_next();
            }
            Err(_) => self.finish_round().await,
        }
    }

    async fn finish_round(&mut self) {
        let score = self.round.score();
        let total = self.round.total();

        let stats = match self.statistics.record(score, total).await {
            Ok(stats) => stats,
            Err(err) => {
                warn!(error = %err, score, total, "failed to persist round, showing last known statistics");
                self.last_known_statistics().await
            }
        };

        let summary = RoundSummary::new(&self.round, &stats);
        self.phase = SessionPhase::RoundComplete;
        self.current = None;
        info!(score, total, games_played = stats.games_played(), "round complete");

        self.presenter.send(PresentationCommand::ShowRoundResult {
            alert: AlertModel::round_result(&summary),
            summary,
        });
    }

    async fn last_known_statistics(&self) -> AggregateStatistics {
        match self.statistics.current().await {
            Ok(stats) => stats,
            Err(err) => {
                warn!(error = %err, "failed to read statistics");
                AggregateStatistics::fresh(self.clock.now())
            }
        }
    }

    fn on_restart(&mut self) {
        match self.phase {
            SessionPhase::RoundComplete | SessionPhase::AwaitingAnswer | SessionPhase::Resolving => {}
            SessionPhase::Loading | SessionPhase::Error => {
                debug!(phase = ?self.phase, "restart ignored");
                return;
            }
        }
        self.reset_round();
        self.begin_loading();
        self.request_next();
    }

    fn on_retry(&mut self) {
        if self.phase != SessionPhase::Error {
            debug!(phase = ?self.phase, "retry ignored");
            return;
        }
        self.reset_round();
        self.begin_loading();
        self.load_data();
    }

    fn fail(&mut self, err: &LoadError) {
        warn!(error = %err, "question source failed");
        self.pending_fetch = None;
        self.phase = SessionPhase::Error;

        self.presenter.send(PresentationCommand::SetLoading(false));
        self.presenter.send(PresentationCommand::SetInputEnabled(false));
        self.presenter
            .send(PresentationCommand::ShowError(AlertModel::load_error(
                err.to_string(),
            )));
    }

    fn reset_round(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.cancel_pending();
        self.round.reset();
        self.current = None;
        self.presenter.send(PresentationCommand::ClearFeedback);
    }

    fn begin_loading(&mut self) {
        self.phase = SessionPhase::Loading;
        self.presenter.send(PresentationCommand::SetInputEnabled(false));
        self.presenter.send(PresentationCommand::SetLoading(true));
    }

    fn load_data(&mut self) {
        let Some(events) = self.outbox.upgrade() else {
            return;
        };
        let source = Arc::clone(&self.source);
        let epoch = self.epoch;

        let task = tokio::spawn(async move {
            let result = source.load_all().await;
            let _ = events.send(QuizEvent::DataLoaded { epoch, result });
        });
        self.track_fetch(task.abort_handle());
    }

    fn request_next(&mut self) {
        let Some(events) = self.outbox.upgrade() else {
            return;
        };
        let source = Arc::clone(&self.source);
        let epoch = self.epoch;

        let task = tokio::spawn(async move {
            let result = source.request_next().await;
            let _ = events.send(QuizEvent::QuestionDelivered { epoch, result });
        });
        self.track_fetch(task.abort_handle());
    }

    fn schedule_transition(&mut self) {
        let Some(events) = self.outbox.upgrade() else {
            return;
        };
        let delay = self.config.transition_delay();
        let epoch = self.epoch;

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(QuizEvent::TransitionElapsed { epoch });
        });
        if let Some(previous) = self.pending_transition.replace(task.abort_handle()) {
            previous.abort();
        }
    }

    fn track_fetch(&mut self, handle: AbortHandle) {
        if let Some(previous) = self.pending_fetch.replace(handle) {
            previous.abort();
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(fetch) = self.pending_fetch.take() {
            fetch.abort();
        }
        if let Some(transition) = self.pending_transition.take() {
            transition.abort();
        }
    }
}

impl Drop for QuizController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
