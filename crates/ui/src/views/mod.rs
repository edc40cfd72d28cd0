mod quiz;
mod state;
mod statistics;

pub use quiz::QuizView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use statistics::StatisticsView;
