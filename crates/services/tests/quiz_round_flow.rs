use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use quiz_core::QuizConfig;
use quiz_core::model::{AggregateStatistics, Question};
use quiz_core::time::fixed_clock;
use services::{
    AlertAction, LoadError, PresentationCommand, QuestionSource, QuizController, RoundSummary,
    StatisticsService,
};
use storage::repository::{InMemoryRepository, StatisticsRepository, StorageError};
use tokio::sync::mpsc;

struct AlwaysYes;

#[async_trait]
impl QuestionSource for AlwaysYes {
    async fn load_all(&self) -> Result<(), LoadError> {
        Ok(())
    }

    async fn request_next(&self) -> Result<Option<Question>, LoadError> {
        Ok(Some(Question::new(
            vec![0xFF, 0xD8],
            "Is this movie rated higher than 7?",
            true,
        )))
    }
}

#[derive(Default)]
struct CountingRepository {
    inner: InMemoryRepository,
    saves: AtomicUsize,
}

#[async_trait]
impl StatisticsRepository for CountingRepository {
    async fn get_statistics(&self) -> Result<Option<AggregateStatistics>, StorageError> {
        self.inner.get_statistics().await
    }

    async fn save_statistics(&self, stats: &AggregateStatistics) -> Result<(), StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save_statistics(stats).await
    }
}

/// Answers every question, `true` for the first `correct` and `false` after that,
/// until the round result arrives.
async fn play_round(
    commands: &mut mpsc::UnboundedReceiver<PresentationCommand>,
    handle: &services::QuizHandle,
    correct: usize,
) -> (RoundSummary, Vec<String>) {
    let mut counters = Vec::new();
    while let Some(command) = commands.recv().await {
        match command {
            PresentationCommand::ShowQuestion(step) => {
                counters.push(step.question_number);
                handle.answer(counters.len() <= correct);
            }
            PresentationCommand::ShowRoundResult { summary, alert } => {
                assert_eq!(alert.action, AlertAction::Restart);
                assert_eq!(alert.title, "This round is over!");
                return (summary, counters);
            }
            PresentationCommand::ShowError(alert) => panic!("unexpected error: {}", alert.message),
            _ => {}
        }
    }
    panic!("controller stopped before the round ended");
}

#[tokio::test(start_paused = true)]
async fn full_round_records_statistics_once() {
    let repo = Arc::new(CountingRepository::default());
    let statistics = Arc::new(StatisticsService::new(fixed_clock(), repo.clone()));
    let config = QuizConfig::new(10, Duration::from_secs(1)).unwrap();
    let (tx, mut commands) = mpsc::unbounded_channel();

    let (controller, handle) =
        QuizController::new(config, Arc::new(AlwaysYes), statistics, tx).unwrap();
    let task = controller.with_clock(fixed_clock()).spawn();

    let started = tokio::time::Instant::now();
    let (summary, counters) = play_round(&mut commands, &handle, 6).await;

    assert_eq!((summary.score, summary.total), (6, 10));
    assert_eq!(summary.games_played, 1);
    assert_eq!(summary.accuracy_label(), "60.00%");
    assert_eq!(counters.first().map(String::as_str), Some("1/10"));
    assert_eq!(counters.last().map(String::as_str), Some("10/10"));
    assert!(started.elapsed() >= Duration::from_secs(10));
    assert_eq!(repo.saves.load(Ordering::SeqCst), 1);

    drop(handle);
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn second_round_updates_aggregate() {
    let repo = Arc::new(CountingRepository::default());
    let statistics = Arc::new(StatisticsService::new(fixed_clock(), repo.clone()));
    let config = QuizConfig::new(10, Duration::from_secs(1)).unwrap();
    let (tx, mut commands) = mpsc::unbounded_channel();

    let (controller, handle) =
        QuizController::new(config, Arc::new(AlwaysYes), statistics.clone(), tx).unwrap();
    let _task = controller.spawn();

    let (first, _) = play_round(&mut commands, &handle, 6).await;
    assert_eq!(first.best_game.correct(), 6);

    handle.restart();
    let (second, counters) = play_round(&mut commands, &handle, 8).await;

    assert_eq!(counters.first().map(String::as_str), Some("1/10"));
    assert_eq!((second.score, second.total), (8, 10));
    assert_eq!(second.games_played, 2);
    assert_eq!(second.best_game.correct(), 8);
    assert!((second.accuracy - 0.7).abs() < 1e-9);
    assert_eq!(repo.saves.load(Ordering::SeqCst), 2);

    let stored = statistics.current().await.unwrap();
    assert_eq!(stored.games_played(), 2);
}
