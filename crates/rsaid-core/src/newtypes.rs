/// Validated newtype wrapper for the 13-digit identity number.
///
/// [`IdNumber`] enforces the structural gate at construction time via
/// [`TryFrom<&str>`]: exactly 13 characters, every one an ASCII digit. Calendar
/// validity and the checksum are *not* enforced here; those belong to the
/// validation engine, which reports them as separate findings. Serde
/// `Deserialize` re-runs the structural gate so malformed numbers cannot enter
/// the type system from untrusted JSON.
use std::fmt;
use std::ops::{Deref, Range};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

/// Number of characters in a structurally valid identity number.
pub const ID_NUMBER_LEN: usize = 13;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced when a string fails the structural gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdNumberError {
    /// The input is not exactly [`ID_NUMBER_LEN`] characters long.
    #[error("expected {ID_NUMBER_LEN} digits, got {len} characters")]
    WrongLength {
        /// Number of characters (not bytes) in the rejected input.
        len: usize,
    },
    /// The input contains a character outside `0`–`9`.
    #[error("character {found:?} at position {position} is not an ASCII digit")]
    NonDigit {
        /// Zero-based character position of the first offending character.
        position: usize,
        /// The offending character.
        found: char,
    },
}

// ---------------------------------------------------------------------------
// IdField
// ---------------------------------------------------------------------------

/// The fixed-width fields of an identity number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdField {
    /// `[0,2)` two-digit birth year.
    BirthYear,
    /// `[2,4)` birth month.
    BirthMonth,
    /// `[4,6)` birth day.
    BirthDay,
    /// `[6,10)` gender/sequence code.
    Sequence,
    /// `[10,11)` citizenship digit.
    Citizenship,
    /// `[11,13)` control digits consumed by the checksum.
    Control,
}

impl IdField {
    /// Returns the half-open character range occupied by this field.
    pub fn range(self) -> Range<usize> {
        match self {
            Self::BirthYear => 0..2,
            Self::BirthMonth => 2..4,
            Self::BirthDay => 4..6,
            Self::Sequence => 6..10,
            Self::Citizenship => 10..11,
            Self::Control => 11..13,
        }
    }

    /// Returns the snake-case name used in diagnostics and JSON output.
    pub fn name(self) -> &'static str {
        match self {
            Self::BirthYear => "birth_year",
            Self::BirthMonth => "birth_month",
            Self::BirthDay => "birth_day",
            Self::Sequence => "sequence",
            Self::Citizenship => "citizenship",
            Self::Control => "control",
        }
    }
}

impl fmt::Display for IdField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = self.range();
        write!(f, "{}[{},{})", self.name(), range.start, range.end)
    }
}

// ---------------------------------------------------------------------------
// IdNumber
// ---------------------------------------------------------------------------

/// A structurally valid identity number: exactly 13 ASCII digits.
///
/// The inner string is immutable after construction. Field accessors parse the
/// fixed-width substrings on demand; see [`IdField`] for the layout.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdNumber(String);

impl TryFrom<&str> for IdNumber {
    type Error = IdNumberError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let len = s.chars().count();
        if len != ID_NUMBER_LEN {
            return Err(IdNumberError::WrongLength { len });
        }
        if let Some((position, found)) = s.chars().enumerate().find(|(_, c)| !c.is_ascii_digit())
        {
            return Err(IdNumberError::NonDigit { position, found });
        }
        Ok(Self(s.to_owned()))
    }
}

impl IdNumber {
    /// Returns the raw digits of `field` as a string slice.
    pub fn field_str(&self, field: IdField) -> &str {
        self.0.get(field.range()).unwrap_or_default()
    }

    /// Returns the numeric value of `field`.
    ///
    /// Every field is at most four digits wide, so the value always fits.
    pub fn field_value(&self, field: IdField) -> u32 {
        self.field_str(field)
            .bytes()
            .fold(0, |acc, byte| acc * 10 + u32::from(byte - b'0'))
    }

    /// Returns the two-digit birth year (`0`–`99`) before century resolution.
    pub fn year_of_century(&self) -> u32 {
        self.field_value(IdField::BirthYear)
    }

    /// Returns the birth month as written; not guaranteed to be `1`–`12`.
    pub fn birth_month(&self) -> u32 {
        self.field_value(IdField::BirthMonth)
    }

    /// Returns the birth day as written; not guaranteed to exist in the month.
    pub fn birth_day(&self) -> u32 {
        self.field_value(IdField::BirthDay)
    }

    /// Returns the four-digit gender/sequence code (`0`–`9999`).
    pub fn sequence(&self) -> u32 {
        self.field_value(IdField::Sequence)
    }

    /// Returns the citizenship digit.
    pub fn citizenship_digit(&self) -> u32 {
        self.field_value(IdField::Citizenship)
    }

    /// Returns the digit values left to right.
    pub fn digits(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.bytes().map(|byte| u32::from(byte - b'0'))
    }

    /// Returns the identity number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for IdNumber {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for IdNumber {
    type Err = IdNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl Serialize for IdNumber {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for IdNumber {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::try_from(s.as_str()).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
