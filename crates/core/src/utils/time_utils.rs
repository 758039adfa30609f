use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Number of days in the given calendar month.
///
/// Returns 0 for an invalid month so callers iterating over days do nothing.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next_first {
        Some(next) => (next - first).num_days() as u32,
        // December of the last representable year
        None => 31,
    }
}

/// Parses a backend date.
///
/// The backend sends either a plain `YYYY-MM-DD` date or a full RFC 3339
/// timestamp. Timestamps are reduced to their UTC calendar date.
pub fn parse_backend_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    let trimmed = raw.trim();
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(date_err) => match DateTime::parse_from_rfc3339(trimmed) {
            Ok(ts) => Ok(ts.with_timezone(&Utc).date_naive()),
            Err(_) => Err(date_err),
        },
    }
}

/// Serde adapter for [`parse_backend_date`].
pub mod backend_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_backend_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional backend dates.
pub mod backend_date_opt {
    use super::*;

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_some(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse_backend_date(value)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// Today's date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// `(year, month)` of a date.
pub fn year_month(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 1), 31);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 13), 0);
    }

    #[test]
    fn test_parse_plain_date() {
        let d = parse_backend_date("2024-03-05").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_parse_timestamp_uses_utc_date() {
        let d = parse_backend_date("2024-03-05T23:30:00.000Z").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());

        let shifted = parse_backend_date("2024-03-06T01:00:00+02:00").unwrap();
        assert_eq!(shifted, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(parse_backend_date("yesterday").is_err());
    }
}
