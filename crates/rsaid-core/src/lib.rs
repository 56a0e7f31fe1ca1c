#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod check_digits;
pub mod decode;
pub mod enums;
pub mod known_info;
pub mod newtypes;
pub mod phone;
pub mod serde_helpers;
pub mod validation;

pub use check_digits::{check_digit, rsa_id_checksum};
pub use decode::{
    DecodedIdNumber, MALE_SEQUENCE_THRESHOLD, MILLISECONDS_PER_YEAR, decode_age,
    decode_birth_date, decode_gender, decode_is_citizen, reference_now, resolve_century,
};
pub use enums::Gender;
pub use known_info::{KnownHolderInfo, KnownInfoError, parse_calendar_date};
pub use newtypes::{ID_NUMBER_LEN, IdField, IdNumber, IdNumberError};
pub use phone::{PhoneNumberRules, is_valid_phone_number};
pub use validation::{
    CheckId, Diagnostic, ValidationContext, ValidationResult, ValidationRule, build_registry,
    is_valid_id_number, is_valid_id_number_at, validate,
};

/// Returns the current version of the rsaid-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
