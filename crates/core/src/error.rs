use thiserror::Error;

use crate::model::{RecordError, RoundError, StatisticsError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Statistics(#[from] StatisticsError),
}
