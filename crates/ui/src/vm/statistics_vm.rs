use quiz_core::model::AggregateStatistics;

use super::time_fmt::format_record_date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatisticsVm {
    pub games_played: u32,
    /// `None` until a round has been finished.
    pub best_label: Option<String>,
    pub accuracy_label: String,
}

#[must_use]
pub fn map_statistics(stats: &AggregateStatistics) -> StatisticsVm {
    let best = stats.best_game();
    let best_label = (stats.games_played() > 0).then(|| {
        format!(
            "{}/{} ({})",
            best.correct(),
            best.total(),
            format_record_date(best.date())
        )
    });

    StatisticsVm {
        games_played: stats.games_played(),
        best_label,
        accuracy_label: format!("{:.2}%", stats.accuracy_percent()),
    }
}
