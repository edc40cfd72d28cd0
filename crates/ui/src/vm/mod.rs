mod quiz_vm;
mod statistics_vm;
mod time_fmt;

pub use quiz_vm::{AlertVm, Feedback, QuestionVm, QuizVm};
pub use statistics_vm::{StatisticsVm, map_statistics};
pub use time_fmt::format_record_date;
