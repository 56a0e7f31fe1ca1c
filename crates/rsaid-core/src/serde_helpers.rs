/// Serde helper functions for the known-info contract.
///
/// The primary export is [`deserialize_optional_calendar_date`], which accepts
/// both the ISO `YYYY-MM-DD` form and the slash-separated `YYYY/MM/DD` form
/// that form layers commonly produce, and maps `null` to "not supplied".
/// [`deserialize_optional_gender`] does the same for gender strings. Both
/// treat a blank string as "not supplied" too.
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, de};

use crate::enums::Gender;
use crate::known_info::parse_calendar_date;

/// Reads an optional string, mapping `null` and blank strings to `None`.
fn optional_non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

/// Deserializer for `Option<NaiveDate>` that accepts either date layout.
///
/// | JSON                          | Rust result              |
/// |-------------------------------|--------------------------|
/// | field absent                  | `None` (needs `default`) |
/// | `"field": null`               | `None`                   |
/// | `"field": ""`                 | `None`                   |
/// | `"field": "2004-09-13"`       | `Some(2004-09-13)`       |
/// | `"field": "2004/09/13"`       | `Some(2004-09-13)`       |
/// | `"field": "2004-02-30"`       | error                    |
///
/// Use with `#[serde(default, deserialize_with = "...")]`.
pub fn deserialize_optional_calendar_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    optional_non_blank(deserializer)?
        .map(|s| parse_calendar_date(&s).map_err(de::Error::custom))
        .transpose()
}

/// Deserializer for `Option<Gender>` that treats `null` and `""` as absent.
///
/// Any other string must start with `f` or `m`, as for [`Gender`]'s own
/// `FromStr`.
pub fn deserialize_optional_gender<'de, D>(deserializer: D) -> Result<Option<Gender>, D::Error>
where
    D: Deserializer<'de>,
{
    optional_non_blank(deserializer)?
        .map(|s| s.parse::<Gender>().map_err(de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use chrono::NaiveDate;
    use serde::Deserialize;

    use crate::enums::Gender;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Holder {
        #[serde(
            default,
            deserialize_with = "super::deserialize_optional_calendar_date"
        )]
        date: Option<NaiveDate>,
        #[serde(default, deserialize_with = "super::deserialize_optional_gender")]
        gender: Option<Gender>,
    }

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn absent_field_is_none() {
        let h: Holder = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(h.date, None);
    }

    #[test]
    fn null_field_is_none() {
        let h: Holder = serde_json::from_str(r#"{"date":null}"#).expect("deserialize");
        assert_eq!(h.date, None);
    }

    #[test]
    fn iso_and_slash_layouts_both_parse() {
        let a: Holder = serde_json::from_str(r#"{"date":"2004-09-13"}"#).expect("iso");
        let b: Holder = serde_json::from_str(r#"{"date":"2004/09/13"}"#).expect("slash");
        assert_eq!(a.date, ymd(2004, 9, 13));
        assert_eq!(a, b);
    }

    #[test]
    fn impossible_date_is_an_error() {
        let result: Result<Holder, _> = serde_json::from_str(r#"{"date":"2004-02-30"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn blank_date_is_none() {
        let h: Holder = serde_json::from_str(r#"{"date":""}"#).expect("empty");
        assert_eq!(h.date, None);
        let h: Holder = serde_json::from_str(r#"{"date":"   "}"#).expect("spaces");
        assert_eq!(h.date, None);
    }

    #[test]
    fn blank_gender_is_none() {
        let h: Holder = serde_json::from_str(r#"{"gender":""}"#).expect("empty");
        assert_eq!(h.gender, None);
        let h: Holder = serde_json::from_str(r#"{"gender":null}"#).expect("null");
        assert_eq!(h.gender, None);
    }

    #[test]
    fn gender_parses_by_first_letter() {
        let h: Holder = serde_json::from_str(r#"{"gender":"F"}"#).expect("initial");
        assert_eq!(h.gender, Some(Gender::Female));
        let result: Result<Holder, _> = serde_json::from_str(r#"{"gender":"x"}"#);
        assert!(result.is_err());
    }
}
