mod cli;
mod cmd;
mod error;
mod format;
mod io;

use clap::Parser;
use rsaid_core::{KnownHolderInfo, PhoneNumberRules, reference_now};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    if let Err(e) = dispatch(&cli) {
        // Logical failures have already reported their diagnostics.
        if !(cli.quiet && e.exit_code() == 1) {
            eprintln!("{e}");
        }
        std::process::exit(e.exit_code());
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the flag-derived
/// level.
fn init_tracing(quiet: bool, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn dispatch(cli: &Cli) -> Result<(), CliError> {
    let now = cli.now.unwrap_or_else(reference_now);
    tracing::debug!(%now, "reference instant");

    match &cli.command {
        Command::Validate {
            id,
            dob,
            age,
            gender,
            citizen,
            known,
        } => {
            let from_file = cmd::validate::load_known(known.as_ref(), cli.max_file_size)?;
            let from_flags = KnownHolderInfo {
                date_of_birth: *dob,
                age: *age,
                gender: *gender,
                is_citizen: *citizen,
            };
            let merged = from_file.merged_with(&from_flags);
            cmd::validate::run(
                id,
                &merged,
                now,
                cli.format,
                cli.quiet,
                cli.verbose,
                cli.no_color,
            )
        }
        Command::Decode { id } => cmd::decode::run(id, now, cli.format),
        Command::Phone {
            number,
            no_country_code,
            no_spaces,
        } => {
            let rules = PhoneNumberRules {
                allow_country_code: !no_country_code,
                allow_spaces: !no_spaces,
            };
            cmd::phone::run(number, rules, cli.format)
        }
        Command::Batch { file } => {
            let content = io::read_input(file, cli.max_file_size)?;
            cmd::batch::run(
                &content,
                now,
                cli.format,
                cli.quiet,
                cli.verbose,
                cli.no_color,
            )
        }
        Command::Version => {
            println!("{}", rsaid_core::version());
            Ok(())
        }
    }
}
