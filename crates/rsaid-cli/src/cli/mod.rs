//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use rsaid_core::Gender;

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl PathOrStdin {
    /// Label used in error messages: `"-"` for stdin, otherwise the path.
    pub fn label(&self) -> String {
        match self {
            Self::Stdin => "-".to_owned(),
            Self::Path(path) => path.display().to_string(),
        }
    }
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
///
/// `Human` emits plain text lines. `Json` emits NDJSON for diagnostics and a
/// single object for decoded data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, optionally colored output (default).
    Human,
    /// Structured JSON / NDJSON output.
    Json,
}

/// Parses a `--now` value: a calendar date (midnight) or a full local
/// date-time.
pub fn parse_reference_time(s: &str) -> Result<NaiveDateTime, String> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS, got \"{s}\""))
}

/// All top-level subcommands exposed by the `rsaid` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Validate an identity number, optionally against known holder facts.
    Validate {
        /// The 13-digit identity number.
        #[arg(value_name = "ID")]
        id: String,
        /// Known date of birth (YYYY-MM-DD or YYYY/MM/DD).
        #[arg(long, value_name = "DATE", value_parser = parse_known_date)]
        dob: Option<NaiveDate>,
        /// Known age in whole years.
        #[arg(long, value_name = "YEARS")]
        age: Option<u32>,
        /// Known gender (first letter, any case: f/female, m/male).
        #[arg(long, value_name = "GENDER")]
        gender: Option<Gender>,
        /// Known citizenship: true for a South African citizen.
        #[arg(long, value_name = "BOOL")]
        citizen: Option<bool>,
        /// JSON file of known facts, or `-` for stdin. Flags override its fields.
        #[arg(long, value_name = "FILE")]
        known: Option<PathOrStdin>,
    },

    /// Print the facts encoded in an identity number.
    Decode {
        /// The 13-digit identity number.
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Check a South African phone number.
    Phone {
        /// The phone number to check.
        #[arg(value_name = "NUMBER")]
        number: String,
        /// Reject the `+27` international prefix.
        #[arg(long)]
        no_country_code: bool,
        /// Reject numbers written with spaces.
        #[arg(long)]
        no_spaces: bool,
    },

    /// Validate one identity number per line from a file.
    Batch {
        /// Path to a text file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
    },

    /// Print the rsaid-core library version.
    Version,
}

fn parse_known_date(s: &str) -> Result<NaiveDate, String> {
    rsaid_core::parse_calendar_date(s).map_err(|e| e.to_string())
}

/// Root CLI struct for the `rsaid` binary.
///
/// All global flags are marked `global = true` so that clap propagates them
/// to every subcommand.
#[derive(Parser)]
#[command(
    name = "rsaid",
    version,
    about = "South African identity number validator",
    long_about = "Validates and decodes South African identity numbers.\n\
                  Checks structure, birth date and checksum, compares against\n\
                  known holder facts, and checks phone numbers."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Suppress all stderr output except errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase stderr verbosity: debug logging and per-line detail
    /// (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Reference instant for century and age decoding.
    ///
    /// Accepts `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`. Defaults to the local
    /// wall clock. Can also be set via the `RSAID_NOW` environment variable.
    #[arg(long, global = true, env = "RSAID_NOW", value_parser = parse_reference_time)]
    pub now: Option<NaiveDateTime>,

    /// Maximum input file size in bytes for `batch` and `--known`.
    ///
    /// Can also be set via the `RSAID_MAX_FILE_SIZE` environment variable.
    /// Default: 16777216 (16 MiB).
    #[arg(
        long,
        global = true,
        env = "RSAID_MAX_FILE_SIZE",
        default_value = "16777216"
    )]
    pub max_file_size: u64,

    /// Disable ANSI color codes in human output.
    ///
    /// Also respects the `NO_COLOR` environment variable per
    /// <https://no-color.org>. Values such as `1` or `yes` are accepted; `0`,
    /// `false`, `no`, `off` and the empty string read as unset.
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,
}
