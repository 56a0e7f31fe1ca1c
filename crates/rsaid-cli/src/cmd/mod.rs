/// Command module for the `rsaid` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the parsed arguments and returns `Ok(())` on success or
/// a [`crate::error::CliError`] on failure.
pub mod batch;
pub mod decode;
pub mod phone;
pub mod validate;

use crate::error::CliError;

/// Wraps a failed write to `stream` (`"stdout"` or `"stderr"`).
pub(crate) fn write_failed(stream: &str, e: &std::io::Error) -> CliError {
    CliError::IoError {
        source: stream.to_owned(),
        detail: e.to_string(),
    }
}
