#![forbid(unsafe_code)]

pub mod error;
pub mod questions;
pub mod quiz;
pub mod statistics_service;

pub use quiz_core::Clock;

pub use error::{LoadError, SessionError, StatisticsServiceError};
pub use questions::{
    HttpMoviesLoader, MovieQuestionFactory, MoviesApiConfig, MoviesLoading, QuestionSource,
};
pub use quiz::{
    AlertAction, AlertModel, PresentationCommand, QuizController, QuizHandle, QuizStep,
    RoundSummary, SessionPhase,
};
pub use statistics_service::StatisticsService;
