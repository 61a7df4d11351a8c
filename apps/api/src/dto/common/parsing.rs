use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use salesline_core::{AppError, AppResult};
use salesline_domain::{RecordId, UserId};

pub fn parse_optional_user_id(value: Option<String>) -> AppResult<Option<UserId>> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(UserId::parse)
        .transpose()
}

pub fn parse_optional_record_id(value: Option<String>) -> AppResult<Option<RecordId>> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(|value| RecordId::from_str(value.as_str()))
        .transpose()
}

/// Parses a calendar date written `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|error| AppError::Validation(format!("invalid date '{value}': {error}")))
}

/// Parses an RFC 3339 timestamp into UTC.
pub fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|error| AppError::Validation(format!("invalid timestamp '{value}': {error}")))
}

pub fn parse_optional_timestamp(value: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    value.map(parse_timestamp).transpose()
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};
    use salesline_core::AppError;

    use super::{parse_date, parse_optional_record_id, parse_optional_user_id, parse_timestamp};

    #[test]
    fn blank_optional_ids_mean_absent() {
        assert!(matches!(parse_optional_user_id(Some("  ".to_owned())), Ok(None)));
        assert!(matches!(parse_optional_record_id(Some(String::new())), Ok(None)));
        assert!(matches!(parse_optional_user_id(None), Ok(None)));
    }

    #[test]
    fn malformed_record_id_is_a_validation_error() {
        let parsed = parse_optional_record_id(Some("not-a-uuid".to_owned()));
        assert!(matches!(parsed, Err(AppError::Validation(_))));
    }

    #[test]
    fn dates_and_timestamps_use_iso_formats() {
        let date = parse_date("2026-03-14").unwrap_or_else(|_| panic!("date should parse"));
        assert_eq!((date.year(), date.month(), date.day()), (2026, 3, 14));

        let timestamp = parse_timestamp("2026-03-14T09:30:00+02:00")
            .unwrap_or_else(|_| panic!("timestamp should parse"));
        assert_eq!(timestamp.hour(), 7);

        assert!(matches!(parse_date("14/03/2026"), Err(AppError::Validation(_))));
        assert!(matches!(parse_timestamp("yesterday"), Err(AppError::Validation(_))));
    }
}
