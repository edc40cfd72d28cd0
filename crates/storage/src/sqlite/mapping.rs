use sqlx::Row;

use crate::repository::{StatisticsRecord, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn map_statistics_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<StatisticsRecord, StorageError> {
    Ok(StatisticsRecord {
        games_played: u32_from_i64(
            "games_played",
            row.try_get::<i64, _>("games_played").map_err(ser)?,
        )?,
        total_accuracy: row.try_get("total_accuracy").map_err(ser)?,
        best_correct: u32_from_i64(
            "best_correct",
            row.try_get::<i64, _>("best_correct").map_err(ser)?,
        )?,
        best_total: u32_from_i64("best_total", row.try_get::<i64, _>("best_total").map_err(ser)?)?,
        best_played_at: row.try_get("best_played_at").map_err(ser)?,
    })
}
