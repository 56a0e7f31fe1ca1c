//! Implementation of `rsaid phone <NUMBER>`.
//!
//! Prints `valid` or `invalid` (or a JSON object) to stdout. A blank number
//! counts as not supplied and is valid.
//!
//! Exit codes:
//! - 0 = valid
//! - 1 = invalid
use std::io::Write;

use rsaid_core::{PhoneNumberRules, is_valid_phone_number};

use crate::cli::OutputFormat;
use crate::cmd::write_failed;
use crate::error::CliError;

/// Runs the `phone` command.
///
/// # Errors
///
/// - [`CliError::InvalidPhoneNumber`]: no accepted pattern matched.
/// - [`CliError::IoError`]: stdout could not be written.
pub fn run(number: &str, rules: PhoneNumberRules, format: OutputFormat) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    check_to(&mut out, number, rules, format)
}

fn check_to<W: Write>(
    writer: &mut W,
    number: &str,
    rules: PhoneNumberRules,
    format: OutputFormat,
) -> Result<(), CliError> {
    let valid = is_valid_phone_number(number, &rules);
    match format {
        OutputFormat::Human => writeln!(writer, "{}", if valid { "valid" } else { "invalid" }),
        OutputFormat::Json => writeln!(
            writer,
            "{}",
            serde_json::json!({ "number": number, "valid": valid })
        ),
    }
    .map_err(|e| write_failed("stdout", &e))?;

    if valid {
        Ok(())
    } else {
        Err(CliError::InvalidPhoneNumber)
    }
}
