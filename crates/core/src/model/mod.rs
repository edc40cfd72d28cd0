mod question;
mod record;
mod round;
mod statistics;

pub use question::Question;
pub use record::{GameRecord, RecordError};
pub use round::{RoundError, RoundState};
pub use statistics::{AggregateStatistics, StatisticsError};
