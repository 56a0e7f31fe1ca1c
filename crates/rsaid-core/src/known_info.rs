//! Facts about an identity-number holder that a caller already knows.
//!
//! [`KnownHolderInfo`] is built per validation call and never mutated by the
//! validator. Every field is independently optional; an absent field imposes
//! no constraint. Because each field is an `Option`, a supplied `age` of `0`
//! or `is_citizen` of `false` is always distinguishable from "not supplied".
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::Gender;

/// Date layouts accepted for a known date of birth.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Errors produced when parsing known-info values from strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KnownInfoError {
    /// A gender string whose first letter is neither `f` nor `m`.
    #[error("unknown gender {0:?}: expected a value starting with 'f' or 'm'")]
    UnknownGender(String),
    /// A date string that is not a real `YYYY-MM-DD` or `YYYY/MM/DD` date.
    #[error("invalid date {0:?}: expected YYYY-MM-DD or YYYY/MM/DD")]
    InvalidDate(String),
}

/// Parses a calendar date in `YYYY-MM-DD` or `YYYY/MM/DD` layout.
///
/// Surrounding whitespace is ignored. Impossible dates such as `2001-02-29`
/// are rejected.
///
/// # Errors
///
/// Returns [`KnownInfoError::InvalidDate`] when no layout matches.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate, KnownInfoError> {
    let trimmed = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| KnownInfoError::InvalidDate(s.to_owned()))
}

/// Optional facts used to cross-check a decoded identity number.
///
/// The JSON form uses the camel-case keys `dateOfBirth`, `age`, `gender` and
/// `isCitizen`; unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct KnownHolderInfo {
    /// Holder's date of birth; compared by calendar date only. A blank string
    /// deserializes as "not supplied".
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_helpers::deserialize_optional_calendar_date"
    )]
    pub date_of_birth: Option<NaiveDate>,

    /// Holder's age in whole years as of the reference instant.
    ///
    /// `Some(0)` is a supplied fact and is checked like any other age; only
    /// `None` means "not supplied".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    /// Holder's gender. A blank string deserializes as "not supplied".
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_helpers::deserialize_optional_gender"
    )]
    pub gender: Option<Gender>,

    /// Whether the holder is a citizen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_citizen: Option<bool>,
}

impl KnownHolderInfo {
    /// Creates an empty record that imposes no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the known date of birth.
    #[must_use]
    pub fn with_date_of_birth(mut self, date: NaiveDate) -> Self {
        self.date_of_birth = Some(date);
        self
    }

    /// Sets the known age in whole years.
    #[must_use]
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Sets the known gender.
    #[must_use]
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Sets the known citizenship.
    #[must_use]
    pub fn with_citizenship(mut self, is_citizen: bool) -> Self {
        self.is_citizen = Some(is_citizen);
        self
    }

    /// Overlays every field that is present in `other` onto `self`.
    #[must_use]
    pub fn merged_with(self, other: &Self) -> Self {
        Self {
            date_of_birth: other.date_of_birth.or(self.date_of_birth),
            age: other.age.or(self.age),
            gender: other.gender.or(self.gender),
            is_citizen: other.is_citizen.or(self.is_citizen),
        }
    }

    /// Returns `true` if no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.date_of_birth.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.is_citizen.is_none()
    }
}
