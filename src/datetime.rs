//! Wire formats for dates and timestamps: `YYYY-MM-DD` and
//! `YYYY-MM-DD HH:MM:SS`.

use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

pub const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
pub const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

pub fn parse_date(value: &str) -> Option<Date> {
    Date::parse(value, DATE_FORMAT).ok()
}

pub mod date {
    use serde::{ser::Error, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = date.format(super::DATE_FORMAT).map_err(S::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}

pub mod timestamp {
    use serde::{ser::Error, Serializer};
    use time::OffsetDateTime;

    pub fn serialize<S: Serializer>(
        value: &OffsetDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let formatted = value
            .format(super::TIMESTAMP_FORMAT)
            .map_err(S::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{datetime, date};

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2025-06-01"), Some(date!(2025 - 06 - 01)));
        assert_eq!(parse_date("2025-6-1"), None);
        assert_eq!(parse_date("01-06-2025"), None);
        assert_eq!(parse_date("not-a-date"), None);
    }

    #[test]
    fn formats_timestamps_without_zone() {
        let ts = datetime!(2025-06-01 10:30:00 UTC);
        assert_eq!(ts.format(TIMESTAMP_FORMAT).unwrap(), "2025-06-01 10:30:00");
    }
}
