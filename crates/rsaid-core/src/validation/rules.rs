/// Rules run after the structural gate.
///
/// Each rule is a zero-sized struct implementing [`ValidationRule`]. Rules
/// that need the decoded birth date stay silent when it is impossible;
/// [`BirthDateRule`] already reports that.
use crate::check_digits::rsa_id_checksum;
use crate::newtypes::IdField;
use crate::validation::{CheckId, Diagnostic, ValidationContext, ValidationRule};

// ---------------------------------------------------------------------------
// Birth date
// ---------------------------------------------------------------------------

/// The date fields must form a real calendar date.
pub struct BirthDateRule;

impl ValidationRule for BirthDateRule {
    fn id(&self) -> CheckId {
        CheckId::BirthDate
    }

    fn check(&self, ctx: &ValidationContext<'_>, diags: &mut Vec<Diagnostic>) {
        if ctx.birth_date.is_some() {
            return;
        }
        diags.push(Diagnostic::new(
            self.id(),
            None,
            format!(
                "{}-{}-{} is not a calendar date",
                ctx.id.birth_year(ctx.now),
                ctx.id.field_str(IdField::BirthMonth),
                ctx.id.field_str(IdField::BirthDay),
            ),
        ));
    }
}

// ---------------------------------------------------------------------------
// Known facts
// ---------------------------------------------------------------------------

/// A supplied date of birth must equal the decoded calendar date.
pub struct KnownDateOfBirthRule;

impl ValidationRule for KnownDateOfBirthRule {
    fn id(&self) -> CheckId {
        CheckId::KnownDateOfBirth
    }

    fn check(&self, ctx: &ValidationContext<'_>, diags: &mut Vec<Diagnostic>) {
        let Some(expected) = ctx.known.and_then(|k| k.date_of_birth) else {
            return;
        };
        let Some(decoded) = ctx.birth_date else {
            return;
        };
        if expected != decoded {
            diags.push(Diagnostic::new(
                self.id(),
                None,
                format!("known date of birth {expected} does not match decoded {decoded}"),
            ));
        }
    }
}

/// A supplied age must equal the decoded age exactly.
pub struct KnownAgeRule;

impl ValidationRule for KnownAgeRule {
    fn id(&self) -> CheckId {
        CheckId::KnownAge
    }

    fn check(&self, ctx: &ValidationContext<'_>, diags: &mut Vec<Diagnostic>) {
        let Some(expected) = ctx.known.and_then(|k| k.age) else {
            return;
        };
        let Some(decoded) = ctx.id.age(ctx.now) else {
            return;
        };
        if i64::from(expected) != decoded {
            diags.push(Diagnostic::new(
                self.id(),
                None,
                format!("known age {expected} does not match decoded age {decoded}"),
            ));
        }
    }
}

/// A supplied gender must equal the decoded gender.
pub struct KnownGenderRule;

impl ValidationRule for KnownGenderRule {
    fn id(&self) -> CheckId {
        CheckId::KnownGender
    }

    fn check(&self, ctx: &ValidationContext<'_>, diags: &mut Vec<Diagnostic>) {
        let Some(expected) = ctx.known.and_then(|k| k.gender) else {
            return;
        };
        let decoded = ctx.id.gender();
        if expected.initial() != decoded.initial() {
            diags.push(Diagnostic::new(
                self.id(),
                Some(IdField::Sequence),
                format!(
                    "known gender {expected} does not match decoded {decoded} (sequence {})",
                    ctx.id.field_str(IdField::Sequence)
                ),
            ));
        }
    }
}

/// A supplied citizenship flag must equal the decoded citizenship.
pub struct KnownCitizenshipRule;

impl ValidationRule for KnownCitizenshipRule {
    fn id(&self) -> CheckId {
        CheckId::KnownCitizenship
    }

    fn check(&self, ctx: &ValidationContext<'_>, diags: &mut Vec<Diagnostic>) {
        let Some(expected) = ctx.known.and_then(|k| k.is_citizen) else {
            return;
        };
        let decoded = ctx.id.is_citizen();
        if expected != decoded {
            diags.push(Diagnostic::new(
                self.id(),
                Some(IdField::Citizenship),
                format!("known citizenship {expected} does not match decoded {decoded}"),
            ));
        }
    }
}

// ---------------------------------------------------------------------------
// Checksum
// ---------------------------------------------------------------------------

/// The mod-10 checksum over all 13 digits must be a multiple of 10.
pub struct ChecksumRule;

impl ValidationRule for ChecksumRule {
    fn id(&self) -> CheckId {
        CheckId::Checksum
    }

    fn check(&self, ctx: &ValidationContext<'_>, diags: &mut Vec<Diagnostic>) {
        if !rsa_id_checksum(ctx.id) {
            diags.push(Diagnostic::new(
                self.id(),
                Some(IdField::Control),
                "mod-10 checksum failed",
            ));
        }
    }
}
