/// Enumerations shared by the decoder and the known-info cross-checks.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::known_info::KnownInfoError;

/// Holder gender as encoded by the sequence field.
///
/// Parsing is deliberately loose: any string whose first character is `f` or
/// `m` (case-insensitive) is accepted, so `"Female"`, `"F"` and `"female"` all
/// parse to [`Gender::Female`]. Serialization always emits the lowercase word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    /// Sequence code below 5000.
    Female,
    /// Sequence code 5000 or above.
    Male,
}

impl Gender {
    /// Returns the lowercase word form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }

    /// Returns the lowercase initial used for comparisons.
    pub fn initial(self) -> char {
        match self {
            Self::Female => 'f',
            Self::Male => 'm',
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = KnownInfoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('f') => Ok(Self::Female),
            Some('m') => Ok(Self::Male),
            Some(_) | None => Err(KnownInfoError::UnknownGender(s.to_owned())),
        }
    }
}

impl Serialize for Gender {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(de::Error::custom)
    }
}
