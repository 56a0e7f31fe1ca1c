//! Implementation of `rsaid decode <ID>`.
//!
//! Prints the facts encoded in a structurally valid identity number to
//! stdout. Decoding does not require a valid checksum or a real birth date;
//! the checksum outcome is reported alongside the facts and an impossible
//! date prints as `invalid` (human) or `null` (JSON).
//!
//! Exit codes:
//! - 0 = decoded
//! - 2 = not 13 ASCII digits
use std::io::Write;

use chrono::NaiveDateTime;
use rsaid_core::{DecodedIdNumber, IdNumber, rsa_id_checksum};

use crate::cli::OutputFormat;
use crate::cmd::write_failed;
use crate::error::CliError;

/// Runs the `decode` command, writing to stdout.
///
/// # Errors
///
/// - [`CliError::MalformedIdNumber`]: `id` fails the structural gate.
/// - [`CliError::IoError`]: stdout could not be written.
pub fn run(id: &str, now: NaiveDateTime, format: OutputFormat) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    decode_to(&mut out, id, now, format)
}

/// Decodes `id` and writes the report to `writer`.
fn decode_to<W: Write>(
    writer: &mut W,
    id: &str,
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<(), CliError> {
    let number = IdNumber::try_from(id).map_err(|e| CliError::MalformedIdNumber {
        detail: e.to_string(),
    })?;
    let decoded = number.decode(now);
    let checksum_valid = rsa_id_checksum(&number);

    match format {
        OutputFormat::Human => write_human(writer, &number, &decoded, checksum_valid),
        OutputFormat::Json => write_json(writer, &number, &decoded, checksum_valid),
    }
    .map_err(|e| write_failed("stdout", &e))
}

fn write_human<W: Write>(
    w: &mut W,
    number: &IdNumber,
    decoded: &DecodedIdNumber,
    checksum_valid: bool,
) -> std::io::Result<()> {
    let birth_date = decoded
        .birth_date
        .map_or_else(|| "invalid".to_owned(), |d| d.to_string());
    let age = decoded
        .age
        .map_or_else(|| "unknown".to_owned(), |a| a.to_string());

    writeln!(w, "id:          {number}")?;
    writeln!(w, "birth date:  {birth_date}")?;
    writeln!(w, "age:         {age}")?;
    writeln!(w, "gender:      {}", decoded.gender)?;
    writeln!(
        w,
        "citizen:     {}",
        if decoded.is_citizen { "yes" } else { "no" }
    )?;
    writeln!(
        w,
        "checksum:    {}",
        if checksum_valid { "ok" } else { "failed" }
    )
}

fn write_json<W: Write>(
    w: &mut W,
    number: &IdNumber,
    decoded: &DecodedIdNumber,
    checksum_valid: bool,
) -> std::io::Result<()> {
    let value = serde_json::json!({
        "id": number.as_str(),
        "birth_date": decoded.birth_date,
        "age": decoded.age,
        "gender": decoded.gender,
        "is_citizen": decoded.is_citizen,
        "checksum_valid": checksum_valid,
    });
    writeln!(w, "{value}")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::wildcard_enum_match_arm)]

    use chrono::NaiveDate;

    use super::*;

    fn now_2018() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 3, 30)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid instant")
    }

    fn capture(id: &str, format: OutputFormat) -> Result<String, CliError> {
        let mut buf: Vec<u8> = Vec::new();
        decode_to(&mut buf, id, now_2018(), format)?;
        Ok(String::from_utf8(buf).expect("utf8"))
    }

    #[test]
    fn human_report_lists_every_fact() {
        let s = capture("0109157840181", OutputFormat::Human).expect("decode");
        assert!(s.contains("birth date:  2001-09-15"), "{s}");
        assert!(s.contains("age:         16"), "{s}");
        assert!(s.contains("gender:      male"), "{s}");
        assert!(s.contains("citizen:     no"), "{s}");
        assert!(s.contains("checksum:    ok"), "{s}");
    }

    #[test]
    fn json_report_fields() {
        let s = capture("0409130295085", OutputFormat::Json).expect("decode");
        let v: serde_json::Value = serde_json::from_str(s.trim()).expect("valid JSON");
        assert_eq!(v["id"], "0409130295085");
        assert_eq!(v["birth_date"], "2004-09-13");
        assert_eq!(v["age"], 13);
        assert_eq!(v["gender"], "female");
        assert_eq!(v["is_citizen"], true);
        assert_eq!(v["checksum_valid"], true);
    }

    #[test]
    fn impossible_date_still_decodes() {
        let s = capture("8013010000086", OutputFormat::Human).expect("decode");
        assert!(s.contains("birth date:  invalid"), "{s}");
        assert!(s.contains("age:         unknown"), "{s}");

        let s = capture("8013010000086", OutputFormat::Json).expect("decode");
        let v: serde_json::Value = serde_json::from_str(s.trim()).expect("valid JSON");
        assert!(v["birth_date"].is_null());
        assert!(v["age"].is_null());
    }

    #[test]
    fn bad_checksum_is_reported_not_rejected() {
        let s = capture("6712272244083", OutputFormat::Human).expect("decode");
        assert!(s.contains("checksum:    failed"), "{s}");
    }

    #[test]
    fn malformed_number_is_exit_2() {
        let err = capture("61422733", OutputFormat::Human).expect_err("malformed");
        assert_eq!(err.exit_code(), 2);
        match err {
            CliError::MalformedIdNumber { detail } => assert!(detail.contains("13"), "{detail}"),
            other => panic!("expected MalformedIdNumber, got {other:?}"),
        }
    }
}
