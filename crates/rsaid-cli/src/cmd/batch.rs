//! Implementation of `rsaid batch <FILE|->`.
//!
//! Validates one identity number per line. Lines are trimmed and blank lines
//! are skipped. Each checked line produces one result on stdout; the summary
//! goes to stderr. In verbose mode the diagnostics for each invalid line are
//! also written to stderr.
//!
//! Exit codes:
//! - 0 = every line valid (or no lines)
//! - 1 = at least one invalid line
//! - 2 = the input could not be read
use std::io::Write;
use std::time::Instant;

use chrono::NaiveDateTime;
use rsaid_core::{ValidationResult, validate};

use crate::cli::OutputFormat;
use crate::cmd::write_failed;
use crate::error::CliError;
use crate::format::{
    FormatMode, FormatterConfig, write_batch_summary, write_diagnostic, write_timing_human,
};

/// Tally of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Non-blank lines checked.
    pub checked: usize,
    /// Lines that failed at least one check.
    pub invalid: usize,
}

/// Runs the `batch` command over already-read `content`.
///
/// # Errors
///
/// - [`CliError::BatchFailures`]: at least one line was invalid.
/// - [`CliError::IoError`]: stdout or stderr could not be written.
pub fn run(
    content: &str,
    now: NaiveDateTime,
    format: OutputFormat,
    quiet: bool,
    verbose: bool,
    no_color: bool,
) -> Result<(), CliError> {
    let mode = FormatMode::from(format);
    let fmt_config = FormatterConfig::from_flags(no_color, quiet, verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let stderr = std::io::stderr();
    let mut err_out = stderr.lock();

    let started = Instant::now();
    let outcome = check_lines(content, now, mode, &fmt_config, &mut out, &mut err_out)?;

    write_timing_human(
        &mut err_out,
        &format!("validated {} identity numbers", outcome.checked),
        started.elapsed(),
        &fmt_config,
    )
    .map_err(|e| write_failed("stderr", &e))?;
    write_batch_summary(
        &mut err_out,
        outcome.checked,
        outcome.invalid,
        mode,
        &fmt_config,
    )
    .map_err(|e| write_failed("stderr", &e))?;

    if outcome.invalid == 0 {
        Ok(())
    } else {
        Err(CliError::BatchFailures {
            invalid: outcome.invalid,
            total: outcome.checked,
        })
    }
}

/// Validates each non-blank line, writing one result per line to `out`.
fn check_lines<O: Write, E: Write>(
    content: &str,
    now: NaiveDateTime,
    mode: FormatMode,
    config: &FormatterConfig,
    out: &mut O,
    err_out: &mut E,
) -> Result<BatchOutcome, CliError> {
    let mut outcome = BatchOutcome::default();

    for (index, raw) in content.lines().enumerate() {
        let id = raw.trim();
        if id.is_empty() {
            continue;
        }
        let line = index + 1;
        let result = validate(id, None, now);
        outcome.checked += 1;
        if !result.is_valid() {
            outcome.invalid += 1;
            tracing::debug!(line, id, failed = result.len(), "invalid identity number");
        }

        write_line_result(out, line, id, &result, mode).map_err(|e| write_failed("stdout", &e))?;

        if config.verbose {
            for diag in &result.diagnostics {
                write_diagnostic(err_out, id, diag, mode, config)
                    .map_err(|e| write_failed("stderr", &e))?;
            }
        }
    }

    Ok(outcome)
}

/// Human: `6712272244082\tvalid` or `6142273344082\tinvalid\tbirth-date,checksum`.
/// JSON: `{"line":1,"id":"...","valid":false,"failed":["birth-date","checksum"]}`.
fn write_line_result<W: Write>(
    w: &mut W,
    line: usize,
    id: &str,
    result: &ValidationResult,
    mode: FormatMode,
) -> std::io::Result<()> {
    let failed: Vec<&str> = result.failed_checks().map(|c| c.code()).collect();
    match mode {
        FormatMode::Human if failed.is_empty() => writeln!(w, "{id}\tvalid"),
        FormatMode::Human => writeln!(w, "{id}\tinvalid\t{}", failed.join(",")),
        FormatMode::Json => {
            let value = serde_json::json!({
                "line": line,
                "id": id,
                "valid": failed.is_empty(),
                "failed": failed,
            });
            writeln!(w, "{value}")
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use chrono::NaiveDate;

    use super::*;

    fn now_2018() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 3, 30)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid instant")
    }

    fn config(verbose: bool) -> FormatterConfig {
        FormatterConfig {
            colors: false,
            quiet: false,
            verbose,
        }
    }

    fn capture(content: &str, mode: FormatMode, verbose: bool) -> (BatchOutcome, String, String) {
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();
        let outcome = check_lines(content, now_2018(), mode, &config(verbose), &mut out, &mut err)
            .expect("check");
        (
            outcome,
            String::from_utf8(out).expect("utf8"),
            String::from_utf8(err).expect("utf8"),
        )
    }

    const MIXED: &str = "6712272244082\n\n  0009139967088  \n6142273344082\r\n61422733\n";

    #[test]
    fn counts_checked_and_invalid_lines() {
        let (outcome, _, _) = capture(MIXED, FormatMode::Human, false);
        assert_eq!(
            outcome,
            BatchOutcome {
                checked: 4,
                invalid: 2
            }
        );
    }

    #[test]
    fn human_lines_are_trimmed_and_tabbed() {
        let (_, out, err) = capture(MIXED, FormatMode::Human, false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "6712272244082\tvalid",
                "0009139967088\tvalid",
                "6142273344082\tinvalid\tbirth-date,checksum",
                "61422733\tinvalid\tstructure",
            ]
        );
        assert!(err.is_empty(), "diagnostics only in verbose mode: {err}");
    }

    #[test]
    fn json_lines_carry_source_line_numbers() {
        let (_, out, _) = capture(MIXED, FormatMode::Json, false);
        let values: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).expect("valid JSON"))
            .collect();
        assert_eq!(values.len(), 4);
        assert_eq!(values[0]["line"], 1);
        assert_eq!(values[0]["valid"], true);
        assert_eq!(values[1]["line"], 3);
        assert_eq!(values[1]["id"], "0009139967088");
        assert_eq!(values[2]["failed"][0], "birth-date");
        assert_eq!(values[2]["failed"][1], "checksum");
        assert_eq!(values[3]["line"], 5);
    }

    #[test]
    fn verbose_mode_writes_diagnostics() {
        let (_, _, err) = capture(MIXED, FormatMode::Human, true);
        assert_eq!(err.matches("[E]").count(), 3, "stderr: {err}");
    }

    #[test]
    fn empty_input_checks_nothing() {
        let (outcome, out, _) = capture("\n \n", FormatMode::Human, false);
        assert_eq!(outcome, BatchOutcome::default());
        assert!(out.is_empty());
    }

    #[test]
    fn run_reports_batch_failures() {
        let err = run(MIXED, now_2018(), OutputFormat::Human, true, false, true)
            .expect_err("two invalid lines");
        assert_eq!(err.exit_code(), 1);
        assert!(matches!(
            err,
            CliError::BatchFailures {
                invalid: 2,
                total: 4
            }
        ));
    }

    #[test]
    fn run_all_valid_is_ok() {
        let res = run(
            "6712272244082\n0409130295085\n",
            now_2018(),
            OutputFormat::Json,
            true,
            false,
            true,
        );
        assert!(res.is_ok());
    }
}
