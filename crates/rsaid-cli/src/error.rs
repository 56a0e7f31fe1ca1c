/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `rsaid` binary. Every
/// variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
///
/// - Exit code **2**: input failure: the tool could not read or parse its
///   input. These errors terminate before any identity number is checked.
/// - Exit code **1**: logical failure: the tool ran to completion and the
///   answer is "invalid".
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions that the `rsaid` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes; `None` for stdin.
        actual: Option<u64>,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// A human-readable label for the source.
        source: String,
        /// The byte offset of the first invalid byte sequence.
        byte_offset: usize,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// A generic I/O error not covered by the more specific variants above.
    IoError {
        /// A human-readable label for the source.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The `--known` document is not a valid known-facts JSON object.
    InvalidKnownInfo {
        /// A human-readable label for the source.
        source: String,
        /// The parse error, including line and column.
        detail: String,
    },

    /// `decode` was given a value that is not 13 ASCII digits.
    MalformedIdNumber {
        /// The structural problem found.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// The identity number failed one or more checks.
    ///
    /// The diagnostics have already been printed.
    InvalidIdNumber {
        /// Number of failed checks.
        failed: usize,
    },

    /// The phone number did not match an accepted pattern.
    InvalidPhoneNumber,

    /// At least one line of a batch was invalid.
    BatchFailures {
        /// Number of invalid lines.
        invalid: usize,
        /// Number of identity numbers checked.
        total: usize,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::InvalidKnownInfo { .. }
            | Self::MalformedIdNumber { .. } => 2,

            Self::InvalidIdNumber { .. } | Self::InvalidPhoneNumber | Self::BatchFailures { .. } => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => {
                format!(
                    "error: invalid UTF-8 in {source}: first invalid byte at offset {byte_offset}"
                )
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error reading {source}: {detail}")
            }
            Self::InvalidKnownInfo { source, detail } => {
                format!("error: invalid known facts in {source}: {detail}")
            }
            Self::MalformedIdNumber { detail } => {
                format!("error: malformed identity number: {detail}")
            }
            Self::InvalidIdNumber { failed } => {
                format!("error: identity number is invalid ({failed} failed checks)")
            }
            Self::InvalidPhoneNumber => "error: phone number is invalid".to_owned(),
            Self::BatchFailures { invalid, total } => {
                format!("error: {invalid} of {total} identity numbers are invalid")
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
