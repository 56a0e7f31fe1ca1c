/// Diagnostic formatting: human-readable and JSON (NDJSON) modes.
///
/// - **Human mode** (default): one `[E]` line per failed check, with the tag
///   colored red when colors are enabled. Colors are disabled when
///   `--no-color` is set, the `NO_COLOR` environment variable is non-empty (per
///   <https://no-color.org>), or stderr is not a TTY.
/// - **JSON mode**: each diagnostic is a single-line JSON object (NDJSON).
///
/// Quiet mode suppresses summaries and timing; diagnostics are always errors
/// and are never suppressed.
use std::io::{IsTerminal as _, Write};
use std::time::Duration;

use rsaid_core::Diagnostic;

use crate::cli::OutputFormat;

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if ANSI color codes should be emitted to stderr.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return false;
    }
    std::io::stderr().is_terminal()
}

const ANSI_RED: &str = "\x1b[31m";
const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// FormatterConfig
// ---------------------------------------------------------------------------

/// Configuration for the formatter, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether ANSI colors are enabled.
    pub colors: bool,
    /// Suppress summaries and timing.
    pub quiet: bool,
    /// Emit timing to stderr.
    pub verbose: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the raw CLI flags.
    pub fn from_flags(no_color_flag: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
            quiet,
            verbose,
        }
    }
}

/// Output format selection, mirroring the CLI `--format` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// Human-readable, optionally colored output.
    Human,
    /// Structured NDJSON output.
    Json,
}

impl From<OutputFormat> for FormatMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => Self::Human,
            OutputFormat::Json => Self::Json,
        }
    }
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Writes a single [`Diagnostic`] in human-readable form.
///
/// Format: `[E] checksum  control[11,13): mod-10 checksum failed`
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_diagnostic_human<W: Write>(
    writer: &mut W,
    diag: &Diagnostic,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    let tag = if config.colors {
        format!("{ANSI_RED}[E]{ANSI_RESET}")
    } else {
        "[E]".to_owned()
    };
    match diag.field {
        Some(field) => writeln!(
            writer,
            "{tag} {check}  {field}: {message}",
            check = diag.check,
            message = diag.message,
        ),
        None => writeln!(
            writer,
            "{tag} {check}: {message}",
            check = diag.check,
            message = diag.message,
        ),
    }
}

/// Writes a single [`Diagnostic`] as an NDJSON line.
///
/// ```json
/// {"check":"checksum","field":"control","id":"6712272244083","message":"mod-10 checksum failed"}
/// ```
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_diagnostic_json<W: Write>(
    writer: &mut W,
    id: &str,
    diag: &Diagnostic,
) -> std::io::Result<()> {
    let value = serde_json::json!({
        "id": id,
        "check": diag.check.code(),
        "field": diag.field.map(|f| f.name()),
        "message": diag.message
    });
    writeln!(writer, "{value}")
}

/// Writes a single [`Diagnostic`] in the requested format.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_diagnostic<W: Write>(
    writer: &mut W,
    id: &str,
    diag: &Diagnostic,
    mode: FormatMode,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    match mode {
        FormatMode::Human => write_diagnostic_human(writer, diag, config),
        FormatMode::Json => write_diagnostic_json(writer, id, diag),
    }
}

// ---------------------------------------------------------------------------
// Verdict (single identity number)
// ---------------------------------------------------------------------------

/// Writes the closing verdict for one identity number.
///
/// Human: `valid` or `invalid: 2 failed checks`.
/// JSON: `{"summary":{"failed":2,"valid":false}}`.
///
/// Suppressed in quiet mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_verdict<W: Write>(
    writer: &mut W,
    failed: usize,
    mode: FormatMode,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    match mode {
        FormatMode::Human if failed == 0 => {
            if config.colors {
                writeln!(writer, "{ANSI_GREEN}valid{ANSI_RESET}")
            } else {
                writeln!(writer, "valid")
            }
        }
        FormatMode::Human => writeln!(
            writer,
            "invalid: {failed} failed {}",
            pluralize(failed, "check", "checks")
        ),
        FormatMode::Json => {
            let value = serde_json::json!({
                "summary": { "valid": failed == 0, "failed": failed }
            });
            writeln!(writer, "{value}")
        }
    }
}

// ---------------------------------------------------------------------------
// Batch summary
// ---------------------------------------------------------------------------

/// Writes the closing summary for a batch run.
///
/// Human: `4 checked, 3 valid, 1 invalid`.
/// JSON: `{"summary":{"checked":4,"invalid":1,"valid":3}}`.
///
/// Suppressed in quiet mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_batch_summary<W: Write>(
    writer: &mut W,
    checked: usize,
    invalid: usize,
    mode: FormatMode,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    let valid = checked.saturating_sub(invalid);
    match mode {
        FormatMode::Human => writeln!(
            writer,
            "{checked} checked, {valid} valid, {invalid} invalid"
        ),
        FormatMode::Json => {
            let value = serde_json::json!({
                "summary": { "checked": checked, "valid": valid, "invalid": invalid }
            });
            writeln!(writer, "{value}")
        }
    }
}

/// Writes timing information in verbose mode; a no-op otherwise.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_timing_human<W: Write>(
    writer: &mut W,
    label: &str,
    duration: Duration,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if !config.verbose {
        return Ok(());
    }
    writeln!(writer, "{label} in {}ms", duration.as_millis())
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}
