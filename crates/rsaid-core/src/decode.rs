//! Derives holder facts from the fixed-width fields of an identity number.
//!
//! Birth date and age depend on a reference instant: the two-digit birth year
//! is resolved against the two-digit year of `now`, and age is measured from
//! the birth date to `now`. Every function takes `now` explicitly;
//! [`reference_now`] reads the local wall clock for callers at the boundary.
//!
//! The free functions accept raw strings and return `None` for input that
//! fails the structural gate, so they never panic on arbitrary input. The
//! methods on [`IdNumber`] are the typed equivalents.
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::enums::Gender;
use crate::newtypes::IdNumber;

/// Mean Gregorian year (365.2425 days) in milliseconds.
pub const MILLISECONDS_PER_YEAR: i64 = 31_556_952_000;

/// Sequence codes at or above this value denote a male holder.
pub const MALE_SEQUENCE_THRESHOLD: u32 = 5000;

/// Returns the current local date and time, for use as the reference instant.
pub fn reference_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Resolves a two-digit year to a four-digit year relative to `now`.
///
/// Years at or below the two-digit year of `now` land in the 2000s; later
/// years land in the 1900s. The boundary moves forward every calendar year.
pub fn resolve_century(year_of_century: u32, now: NaiveDateTime) -> i32 {
    let yy = i32::try_from(year_of_century % 100).unwrap_or_default();
    let current = now.year().rem_euclid(100);
    if yy <= current { 2000 + yy } else { 1900 + yy }
}

/// All facts derivable from an identity number at a given reference instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedIdNumber {
    /// Decoded birth date, or `None` if the digits do not form a real date.
    pub birth_date: Option<NaiveDate>,
    /// Age in whole mean-Gregorian years, or `None` without a birth date.
    pub age: Option<i64>,
    /// Gender derived from the sequence field.
    pub gender: Gender,
    /// Citizenship derived from the citizenship digit.
    pub is_citizen: bool,
}

impl IdNumber {
    /// Returns the four-digit birth year resolved against `now`.
    pub fn birth_year(&self, now: NaiveDateTime) -> i32 {
        resolve_century(self.year_of_century(), now)
    }

    /// Decodes the birth date, returning `None` for an impossible date.
    pub fn birth_date(&self, now: NaiveDateTime) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.birth_year(now), self.birth_month(), self.birth_day())
    }

    /// Decodes the age in whole years at `now`.
    ///
    /// Age is `floor((now - birth) / mean Gregorian year)`, measured from
    /// local midnight on the birth date. A birth date after `now` gives a
    /// negative age. Returns `None` when the birth date is impossible.
    pub fn age(&self, now: NaiveDateTime) -> Option<i64> {
        let born = self.birth_date(now)?.and_hms_opt(0, 0, 0)?;
        let elapsed = (now - born).num_milliseconds();
        Some(elapsed.div_euclid(MILLISECONDS_PER_YEAR))
    }

    /// Decodes the gender from the sequence field.
    pub fn gender(&self) -> Gender {
        if self.sequence() < MALE_SEQUENCE_THRESHOLD {
            Gender::Female
        } else {
            Gender::Male
        }
    }

    /// Returns `true` iff the citizenship digit is `0`.
    pub fn is_citizen(&self) -> bool {
        self.citizenship_digit() == 0
    }

    /// Decodes every derivable fact at once.
    pub fn decode(&self, now: NaiveDateTime) -> DecodedIdNumber {
        let decoded = DecodedIdNumber {
            birth_date: self.birth_date(now),
            age: self.age(now),
            gender: self.gender(),
            is_citizen: self.is_citizen(),
        };
        tracing::trace!(id = %self, ?decoded, "decoded identity number");
        decoded
    }
}

/// Decodes the birth date of a raw identity number.
///
/// Returns `None` if `id` fails the structural gate or the digits do not form
/// a real calendar date; `Option::is_some` is the "is valid date" predicate.
pub fn decode_birth_date(id: &str, now: NaiveDateTime) -> Option<NaiveDate> {
    IdNumber::try_from(id).ok()?.birth_date(now)
}

/// Decodes the age of a raw identity number's holder at `now`.
pub fn decode_age(id: &str, now: NaiveDateTime) -> Option<i64> {
    IdNumber::try_from(id).ok()?.age(now)
}

/// Decodes the gender of a raw identity number's holder.
pub fn decode_gender(id: &str) -> Option<Gender> {
    IdNumber::try_from(id).ok().map(|n| n.gender())
}

/// Decodes the citizenship of a raw identity number's holder.
pub fn decode_is_citizen(id: &str) -> Option<bool> {
    IdNumber::try_from(id).ok().map(|n| n.is_citizen())
}
