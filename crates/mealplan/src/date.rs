use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};

/// Parses a calendar day from either `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Timestamps keep the calendar day of their own offset, so
/// `2024-03-04T00:00:00+01:00` is the 4th and not the 3rd.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(day);
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|timestamp| timestamp.date_naive())
}

/// Parses an RFC 3339 timestamp, or a bare date taken as midnight UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|day| day.and_time(NaiveTime::MIN).and_utc())
}

pub fn advance(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

pub fn retreat(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}

/// Moves `days` forward (or backward when negative). `None` past the
/// calendar limits.
pub fn shift(date: NaiveDate, days: i32) -> Option<NaiveDate> {
    date.checked_add_signed(TimeDelta::days(days.into()))
}

pub(crate) mod serde_day {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, de::Error};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_day(&value).ok_or_else(|| D::Error::custom(format!("invalid date {value}")))
    }

    pub fn deserialize_option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let Some(value) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        super::parse_day(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid date {value}")))
    }
}

pub(crate) mod serde_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, de::Error};

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_timestamp(&value)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp {value}")))
    }
}
