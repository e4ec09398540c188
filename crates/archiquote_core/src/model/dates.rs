//! Calendar date serde adapters.
//!
//! Dates are written as ISO-8601 `YYYY-MM-DD`. Reading also accepts a full
//! RFC 3339 timestamp (date part kept) and the long `18 October 2026` form
//! that older transmittal saves contain.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const LONG_DATE_FORMAT: &str = "%d %B %Y";

/// Parses a stored date in any accepted shape.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
        .or_else(|| NaiveDate::parse_from_str(trimmed, LONG_DATE_FORMAT).ok())
}

/// Long form used on printed transmittals, e.g. `8 October 2026`.
pub fn long_form(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Serde adapter for `NaiveDate` fields.
///
/// Use with `#[serde(with = "crate::model::dates::flexible")]`.
pub mod flexible {
    use super::{parse_date, ISO_DATE_FORMAT};
    use chrono::NaiveDate;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(ISO_DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date `{raw}`")))
    }
}

/// Reads an optional source reference where older saves wrote `""` for "none".
pub fn empty_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::{long_form, parse_date};
    use chrono::NaiveDate;

    #[test]
    fn parse_date_accepts_iso_timestamp_and_long_form() {
        let expected = NaiveDate::from_ymd_opt(2026, 10, 8).unwrap();
        assert_eq!(parse_date("2026-10-08"), Some(expected));
        assert_eq!(parse_date("2026-10-08T09:30:00.000Z"), Some(expected));
        assert_eq!(parse_date("8 October 2026"), Some(expected));
        assert_eq!(parse_date("next week"), None);
        assert_eq!(parse_date("21/01/2025"), None);
    }

    #[test]
    fn long_form_parses_back() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(long_form(date), "5 January 2026");
        assert_eq!(parse_date(&long_form(date)), Some(date));
    }
}
