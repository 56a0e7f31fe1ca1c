/// Diagnostic types and rule dispatch for identity-number validation.
///
/// This module defines [`CheckId`], [`Diagnostic`] and [`ValidationResult`],
/// the types that record which checks an identity number failed. It also
/// defines the [`ValidationRule`] trait, [`build_registry`], and the top-level
/// [`validate`] dispatch function.
///
/// The boolean view is the primary contract: [`is_valid_id_number`] and
/// `bool::from(ValidationResult)` collapse every failure to `false`. The
/// diagnostics are an additive, richer view of the same outcome.
pub mod rules;

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::decode::reference_now;
use crate::known_info::KnownHolderInfo;
use crate::newtypes::{IdField, IdNumber};


/// Machine-readable identifier for a validation check.
///
/// Each variant is one failure mode in the error taxonomy. [`CheckId::code`]
/// returns the hyphenated form used in serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckId {
    /// Wrong length or a character other than an ASCII digit.
    Structure,
    /// The date fields do not form a real calendar date.
    BirthDate,
    /// The supplied date of birth differs from the decoded one.
    KnownDateOfBirth,
    /// The supplied age differs from the decoded one.
    KnownAge,
    /// The supplied gender differs from the decoded one.
    KnownGender,
    /// The supplied citizenship differs from the decoded one.
    KnownCitizenship,
    /// The mod-10 checksum over all 13 digits is not a multiple of 10.
    Checksum,
}

impl CheckId {
    /// Returns the canonical hyphenated check code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::BirthDate => "birth-date",
            Self::KnownDateOfBirth => "known-date-of-birth",
            Self::KnownAge => "known-age",
            Self::KnownGender => "known-gender",
            Self::KnownCitizenship => "known-citizenship",
            Self::Checksum => "checksum",
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The check that failed.
    pub check: CheckId,
    /// The identity-number field responsible, if the failure is local to one.
    pub field: Option<IdField>,
    /// A human-readable explanation of the failure.
    pub message: String,
}

impl Diagnostic {
    /// Constructs a new [`Diagnostic`].
    pub fn new(check: CheckId, field: Option<IdField>, message: impl Into<String>) -> Self {
        Self {
            check,
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(field) => write!(f, "[E] {} {}: {}", self.check, field, self.message),
            None => write!(f, "[E] {}: {}", self.check, self.message),
        }
    }
}

/// The collected outcome of validating one identity number.
///
/// An empty diagnostic list means the number is valid. All applicable checks
/// run; only a structural failure stops early, because nothing can be decoded
/// from a malformed string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    /// Every failed check, in evaluation order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Creates an empty (valid) [`ValidationResult`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`ValidationResult`] from a pre-built list of diagnostics.
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Returns `true` if no check failed.
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns `true` if the given check failed.
    pub fn failed(&self, check: CheckId) -> bool {
        self.diagnostics.iter().any(|d| d.check == check)
    }

    /// Returns the failed checks in evaluation order.
    pub fn failed_checks(&self) -> impl Iterator<Item = CheckId> + '_ {
        self.diagnostics.iter().map(|d| d.check)
    }

    /// Returns the number of failed checks.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if there are no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl From<ValidationResult> for bool {
    fn from(result: ValidationResult) -> Self {
        result.is_valid()
    }
}

/// Everything a rule may inspect while checking one identity number.
#[derive(Debug, Clone)]
pub struct ValidationContext<'a> {
    /// The structurally valid identity number under test.
    pub id: &'a IdNumber,
    /// The decoded birth date, or `None` for an impossible date.
    pub birth_date: Option<NaiveDate>,
    /// Caller-supplied facts, if any.
    pub known: Option<&'a KnownHolderInfo>,
    /// The reference instant for century resolution and age.
    pub now: NaiveDateTime,
}

impl<'a> ValidationContext<'a> {
    /// Builds a context, decoding the birth date once for all rules.
    pub fn new(
        id: &'a IdNumber,
        known: Option<&'a KnownHolderInfo>,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            birth_date: id.birth_date(now),
            known,
            now,
        }
    }
}

/// A single check run against a structurally valid identity number.
///
/// Rules push zero or more [`Diagnostic`]s into `diags`; they never return
/// early on behalf of other rules.
pub trait ValidationRule {
    /// The check this rule implements.
    fn id(&self) -> CheckId;

    /// Runs the check, appending a diagnostic for each failure.
    fn check(&self, ctx: &ValidationContext<'_>, diags: &mut Vec<Diagnostic>);
}

/// Returns the rules run after the structural gate, in evaluation order.
///
/// Knowledge rules are always registered; each one is a no-op when its fact
/// was not supplied.
pub fn build_registry() -> Vec<Box<dyn ValidationRule>> {
    vec![
        Box::new(rules::BirthDateRule),
        Box::new(rules::KnownDateOfBirthRule),
        Box::new(rules::KnownAgeRule),
        Box::new(rules::KnownGenderRule),
        Box::new(rules::KnownCitizenshipRule),
        Box::new(rules::ChecksumRule),
    ]
}

/// Validates a raw identity number against optional known facts at `now`.
///
/// Steps: the structural gate, then every registered rule. The returned
/// [`ValidationResult`] is valid iff every step passed.
pub fn validate(
    id: &str,
    known: Option<&KnownHolderInfo>,
    now: NaiveDateTime,
) -> ValidationResult {
    let id_number = match IdNumber::try_from(id) {
        Ok(n) => n,
        Err(e) => {
            tracing::debug!(check = %CheckId::Structure, error = %e, "identity number rejected");
            return ValidationResult::from_diagnostics(vec![Diagnostic::new(
                CheckId::Structure,
                None,
                e.to_string(),
            )]);
        }
    };

    let ctx = ValidationContext::new(&id_number, known, now);
    let mut diags = Vec::new();
    for rule in build_registry() {
        rule.check(&ctx, &mut diags);
    }

    for diag in &diags {
        tracing::debug!(id = %id_number, check = %diag.check, "{}", diag.message);
    }
    ValidationResult::from_diagnostics(diags)
}

/// Returns `true` iff `id` passes every check at the local wall-clock time.
pub fn is_valid_id_number(id: &str, known: Option<&KnownHolderInfo>) -> bool {
    is_valid_id_number_at(id, known, reference_now())
}

/// Returns `true` iff `id` passes every check at the given reference instant.
pub fn is_valid_id_number_at(
    id: &str,
    known: Option<&KnownHolderInfo>,
    now: NaiveDateTime,
) -> bool {
    validate(id, known, now).into()
}
