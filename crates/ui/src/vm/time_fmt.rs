use chrono::{DateTime, Utc};

const RECORD_DATE_FORMAT: &str = "%d.%m.%y %H:%M";

#[must_use]
pub fn format_record_date(value: DateTime<Utc>) -> String {
    value.format(RECORD_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    #[test]
    fn formats_day_first_with_short_year() {
        assert_eq!(format_record_date(fixed_now()), "14.11.23 22:13");
    }
}
