/// South African phone-number pattern check.
///
/// A phone number passes when a national-format number (`0` followed by nine
/// digits) or, if allowed, an international one (`+27` followed by nine
/// digits) occurs in the value. The pattern is searched, not anchored. A value
/// that is blank after trimming counts as "not supplied" and passes.
use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Compiled regex patterns
//
// Static so they are compiled once. A failed compile falls back to a pattern
// that never matches.
// ---------------------------------------------------------------------------

/// National or `+27` international prefix followed by nine digits.
static WITH_COUNTRY_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+27|0)[0-9]{9}").unwrap_or_else(|_| {
        Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken"))
    })
});

/// National prefix only.
static NATIONAL_ONLY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"0[0-9]{9}").unwrap_or_else(|_| {
        Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken"))
    })
});

/// Options controlling which phone-number spellings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneNumberRules {
    /// Accept the `+27` international prefix as well as a leading `0`.
    pub allow_country_code: bool,
    /// Remove ASCII spaces before matching.
    pub allow_spaces: bool,
}

impl Default for PhoneNumberRules {
    fn default() -> Self {
        Self {
            allow_country_code: true,
            allow_spaces: true,
        }
    }
}

/// Returns `true` if `raw` is blank or contains an acceptable phone number.
pub fn is_valid_phone_number(raw: &str, rules: &PhoneNumberRules) -> bool {
    let candidate: Cow<'_, str> = if rules.allow_spaces {
        Cow::Owned(raw.replace(' ', ""))
    } else {
        Cow::Borrowed(raw)
    };

    if candidate.trim().is_empty() {
        return true;
    }

    let re = if rules.allow_country_code {
        &*WITH_COUNTRY_CODE_RE
    } else {
        &*NATIONAL_ONLY_RE
    };
    let matched = re.is_match(&candidate);
    if !matched {
        tracing::debug!(?rules, "phone number rejected");
    }
    matched
}
