//! Implementation of `rsaid validate <ID>`.
//!
//! Runs every check against one identity number, optionally cross-checked
//! against known holder facts, and emits diagnostics to stderr.
//!
//! Known facts come from `--known <FILE|->` (a JSON object with the keys
//! `dateOfBirth`, `age`, `gender`, `isCitizen`) and from the individual
//! `--dob`, `--age`, `--gender` and `--citizen` flags; flags win.
//!
//! Exit codes:
//! - 0 = valid, or a blank identity number (nothing to validate)
//! - 1 = one or more checks failed
//! - 2 = the known-facts document could not be read or parsed
use std::io::Write as _;

use chrono::NaiveDateTime;
use rsaid_core::{KnownHolderInfo, validate};

use crate::cli::{OutputFormat, PathOrStdin};
use crate::cmd::write_failed;
use crate::error::CliError;
use crate::format::{FormatMode, FormatterConfig, write_diagnostic, write_verdict};
use crate::io::read_input;

// ---------------------------------------------------------------------------
// Known facts
// ---------------------------------------------------------------------------

/// Parses a known-facts JSON document.
///
/// # Errors
///
/// Returns [`CliError::InvalidKnownInfo`] (exit code 2) when `content` is not
/// a JSON object of known facts.
pub fn parse_known(content: &str, source_label: &str) -> Result<KnownHolderInfo, CliError> {
    serde_json::from_str(content).map_err(|e| CliError::InvalidKnownInfo {
        source: source_label.to_owned(),
        detail: e.to_string(),
    })
}

/// Reads and parses the `--known` document, if one was given.
///
/// # Errors
///
/// Propagates read failures from [`read_input`] and parse failures from
/// [`parse_known`].
pub fn load_known(
    source: Option<&PathOrStdin>,
    max_size: u64,
) -> Result<KnownHolderInfo, CliError> {
    match source {
        Some(source) => {
            let content = read_input(source, max_size)?;
            parse_known(&content, &source.label())
        }
        None => Ok(KnownHolderInfo::new()),
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Runs the `validate` command.
///
/// An empty `known` imposes no constraints. The verdict line is written to
/// stderr after the diagnostics (or as a final NDJSON object in JSON mode).
///
/// # Errors
///
/// - [`CliError::InvalidIdNumber`]: one or more checks failed.
/// - [`CliError::IoError`]: stderr could not be written.
pub fn run(
    id: &str,
    known: &KnownHolderInfo,
    now: NaiveDateTime,
    format: OutputFormat,
    quiet: bool,
    verbose: bool,
    no_color: bool,
) -> Result<(), CliError> {
    let mode = FormatMode::from(format);
    let fmt_config = FormatterConfig::from_flags(no_color, quiet, verbose);

    let stderr = std::io::stderr();
    let mut err_out = stderr.lock();

    if id.trim().is_empty() {
        tracing::info!("blank identity number, nothing to validate");
        if !quiet && mode == FormatMode::Human {
            writeln!(err_out, "nothing to validate").map_err(|e| write_failed("stderr", &e))?;
        }
        return Ok(());
    }

    let known = (!known.is_empty()).then_some(known);
    let result = validate(id, known, now);

    for diag in &result.diagnostics {
        write_diagnostic(&mut err_out, id, diag, mode, &fmt_config)
            .map_err(|e| write_failed("stderr", &e))?;
    }
    write_verdict(&mut err_out, result.len(), mode, &fmt_config)
        .map_err(|e| write_failed("stderr", &e))?;

    if result.is_valid() {
        Ok(())
    } else {
        Err(CliError::InvalidIdNumber {
            failed: result.len(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::wildcard_enum_match_arm)]

    use std::io::Write as _;

    use chrono::NaiveDate;
    use rsaid_core::Gender;

    use super::*;

    fn now_2018() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 3, 30)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid instant")
    }

    fn run_human(id: &str, known: &KnownHolderInfo) -> Result<(), CliError> {
        run(id, known, now_2018(), OutputFormat::Human, true, false, true)
    }

    // ── run ──────────────────────────────────────────────────────────────────

    #[test]
    fn valid_number_returns_ok() {
        assert!(run_human("6712272244082", &KnownHolderInfo::new()).is_ok());
    }

    #[test]
    fn bad_checksum_is_exit_1() {
        let err = run_human("6712272244083", &KnownHolderInfo::new()).expect_err("invalid");
        assert_eq!(err.exit_code(), 1);
        match err {
            CliError::InvalidIdNumber { failed } => assert_eq!(failed, 1),
            other => panic!("expected InvalidIdNumber, got {other:?}"),
        }
    }

    #[test]
    fn wrong_length_is_exit_1_not_2() {
        let err = run_human("61422733", &KnownHolderInfo::new()).expect_err("invalid");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn blank_number_is_nothing_to_validate() {
        assert!(run_human("", &KnownHolderInfo::new()).is_ok());
        assert!(run_human("   ", &KnownHolderInfo::new()).is_ok());
    }

    #[test]
    fn known_facts_are_checked() {
        let known = KnownHolderInfo::new()
            .with_date_of_birth(NaiveDate::from_ymd_opt(2001, 9, 15).expect("date"))
            .with_gender(Gender::Male)
            .with_citizenship(false)
            .with_age(16);
        assert!(run_human("0109157840181", &known).is_ok());
        let err = run_human("0109154774086", &known).expect_err("mismatch");
        match err {
            CliError::InvalidIdNumber { failed } => assert_eq!(failed, 2),
            other => panic!("expected InvalidIdNumber, got {other:?}"),
        }
    }

    #[test]
    fn json_format_returns_same_outcome() {
        let ok = run(
            "6712272244082",
            &KnownHolderInfo::new(),
            now_2018(),
            OutputFormat::Json,
            true,
            false,
            true,
        );
        assert!(ok.is_ok());
    }

    // ── known facts ──────────────────────────────────────────────────────────

    #[test]
    fn parse_known_reads_camel_case_keys() {
        let known = parse_known(
            r#"{"dateOfBirth":"2001-09-15","age":16,"gender":"Male","isCitizen":false}"#,
            "known.json",
        )
        .expect("parse");
        assert_eq!(known.date_of_birth, NaiveDate::from_ymd_opt(2001, 9, 15));
        assert_eq!(known.age, Some(16));
        assert_eq!(known.gender, Some(Gender::Male));
        assert_eq!(known.is_citizen, Some(false));
    }

    #[test]
    fn parse_known_rejects_unknown_keys() {
        let err = parse_known(r#"{"name":"Thandi"}"#, "known.json").expect_err("unknown key");
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("known.json"), "{}", err.message());
    }

    #[test]
    fn parse_known_error_mentions_line_and_column() {
        let err = parse_known("{\n  \"age\": nope\n}", "-").expect_err("bad json");
        let msg = err.message();
        assert!(msg.contains("line 2 column"), "message: {msg}");
        assert_eq!(msg.matches("line").count(), 1, "position once: {msg}");
    }

    #[test]
    fn load_known_without_source_is_empty() {
        let known = load_known(None, 1024).expect("empty");
        assert!(known.is_empty());
    }

    #[test]
    fn load_known_from_file() {
        let mut f = tempfile::NamedTempFile::new().expect("temp file");
        f.write_all(br#"{"isCitizen":true}"#).expect("write");
        let source = PathOrStdin::Path(f.path().to_path_buf());
        let known = load_known(Some(&source), 1024).expect("load");
        assert_eq!(known.is_citizen, Some(true));
    }

    #[test]
    fn load_known_missing_file_is_exit_2() {
        let source = PathOrStdin::Path("/no/such/known.json".into());
        let err = load_known(Some(&source), 1024).expect_err("missing");
        assert_eq!(err.exit_code(), 2);
    }
}
