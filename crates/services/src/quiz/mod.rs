mod controller;
mod events;
mod presentation;
mod state;

pub use controller::QuizController;
pub use events::QuizHandle;
pub use presentation::{AlertAction, AlertModel, PresentationCommand, QuizStep, RoundSummary};
pub use state::SessionPhase;
