//! Identity number generator.
//!
//! Draws a birth date, gender and citizenship independently, lays them out
//! in the 13-digit format and appends the check digit, so every generated
//! number passes validation at any reference instant whose century window
//! contains the birth year.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rsaid_core::{Gender, KnownHolderInfo, check_digit, decode_age};

/// Configuration for the identity number generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Birth years to draw from. Must lie within 1900..=2099.
    pub birth_years: RangeInclusive<i32>,
    /// Probability of a male holder (0.0-1.0).
    pub male_ratio: f64,
    /// Probability of a citizen holder (0.0-1.0).
    pub citizen_ratio: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            birth_years: 1930..=2015,
            male_ratio: 0.5,
            citizen_ratio: 0.9,
        }
    }
}

/// Predefined batch sizes for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// 100 numbers
    Small,
    /// 1 000 numbers
    Medium,
    /// 10 000 numbers
    Large,
}

impl SizeTier {
    /// Returns the number of identity numbers in this tier.
    pub fn count(self) -> usize {
        match self {
            SizeTier::Small => 100,
            SizeTier::Medium => 1_000,
            SizeTier::Large => 10_000,
        }
    }
}

/// A generated identity number together with the facts it encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedId {
    /// The 13-digit identity number.
    pub id: String,
    /// The birth date encoded in the first six digits.
    pub birth_date: NaiveDate,
    /// The gender encoded in the sequence field.
    pub gender: Gender,
    /// The citizenship encoded in the citizenship digit.
    pub is_citizen: bool,
}

impl GeneratedId {
    /// Returns known facts that match this number at `now`.
    ///
    /// Age is included only when it is non-negative at `now`.
    pub fn known_info(&self, now: NaiveDateTime) -> KnownHolderInfo {
        let known = KnownHolderInfo::new()
            .with_date_of_birth(self.birth_date)
            .with_gender(self.gender)
            .with_citizenship(self.is_citizen);
        match decode_age(&self.id, now).and_then(|a| u32::try_from(a).ok()) {
            Some(age) => known.with_age(age),
            None => known,
        }
    }
}

/// Generates one valid identity number.
pub fn generate_id_number(rng: &mut StdRng, config: &GeneratorConfig) -> GeneratedId {
    let year = rng.gen_range(config.birth_years.clone());
    let days_in_year = if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366
    } else {
        365
    };
    let birth_date = NaiveDate::from_yo_opt(year, rng.gen_range(1..=days_in_year))
        .unwrap_or_else(|| unreachable!("ordinal within year {year}"));

    let is_male = rng.gen_bool(config.male_ratio.clamp(0.0, 1.0));
    let sequence: u32 = if is_male {
        rng.gen_range(5000..=9999)
    } else {
        rng.gen_range(0..=4999)
    };
    let is_citizen = rng.gen_bool(config.citizen_ratio.clamp(0.0, 1.0));
    let citizenship: u32 = if is_citizen { 0 } else { rng.gen_range(1..=2) };
    let race: u32 = rng.gen_range(8..=9);

    let body = format!(
        "{:02}{:02}{:02}{sequence:04}{citizenship}{race}",
        year.rem_euclid(100),
        birth_date.month(),
        birth_date.day(),
    );
    let digit = check_digit(&body).unwrap_or_else(|| unreachable!("12-digit body {body}"));

    GeneratedId {
        id: format!("{body}{digit}"),
        birth_date,
        gender: if is_male { Gender::Male } else { Gender::Female },
        is_citizen,
    }
}

/// Generates `count` identity numbers from a generator seeded with
/// `config.seed`.
pub fn generate_batch(config: &GeneratorConfig, count: usize) -> Vec<GeneratedId> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    (0..count)
        .map(|_| generate_id_number(&mut rng, config))
        .collect()
}

/// Returns `id` with its final digit replaced, which always breaks the
/// checksum.
pub fn corrupt_check_digit(id: &str) -> String {
    let mut chars: Vec<char> = id.chars().collect();
    if let Some(last) = chars.last_mut() {
        let d = last.to_digit(10).unwrap_or(0);
        *last = char::from_digit((d + 1) % 10, 10).unwrap_or('0');
    }
    chars.into_iter().collect()
}
