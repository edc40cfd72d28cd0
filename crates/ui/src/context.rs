use std::sync::Arc;

use quiz_core::QuizConfig;
use services::{
    PresentationCommand, QuestionSource, QuizController, QuizHandle, SessionError,
    StatisticsService,
};
use tokio::sync::mpsc;

pub trait UiApp: Send + Sync {
    fn quiz_config(&self) -> QuizConfig;

    fn question_source(&self) -> Arc<dyn QuestionSource>;
    fn statistics(&self) -> Arc<StatisticsService>;
}

/// A controller that has not been started yet, plus both ends the view talks through.
pub struct QuizSession {
    pub controller: QuizController,
    pub handle: QuizHandle,
    pub commands: mpsc::UnboundedReceiver<PresentationCommand>,
}

#[derive(Clone)]
pub struct AppContext {
    config: QuizConfig,
    source: Arc<dyn QuestionSource>,
    statistics: Arc<StatisticsService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            config: app.quiz_config(),
            source: app.question_source(),
            statistics: app.statistics(),
        }
    }

    #[must_use]
    pub fn config(&self) -> QuizConfig {
        self.config
    }

    #[must_use]
    pub fn statistics(&self) -> Arc<StatisticsService> {
        Arc::clone(&self.statistics)
    }

    /// Wire a fresh controller to the shared question source and statistics.
    ///
    /// The caller decides where the controller runs; it stops once `handle` is dropped.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the configured round cannot be built.
    pub fn start_quiz(&self) -> Result<QuizSession, SessionError> {
        let (tx, commands) = mpsc::unbounded_channel();
        let (controller, handle) = QuizController::new(
            self.config,
            Arc::clone(&self.source),
            self.statistics(),
            tx,
        )?;
        Ok(QuizSession {
            controller,
            handle,
            commands,
        })
    }
}

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
