//! Command-line interface for building and querying the aptdata catalog.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod download;
mod error;
mod load;
mod lookup;

pub use error::CliError;

use download::{DownloadArgs, run_download};
use load::{LoadArgs, run_load};
use lookup::{LookupArgs, LookupKind, ValidateArgs, run_lookup, run_validate};

pub(crate) const ARG_DATABASE: &str = "database";
pub(crate) const ARG_DATA_DIR: &str = "data-dir";
pub(crate) const ARG_STRICT: &str = "strict";
pub(crate) const ARG_RELOAD: &str = "reload";
pub(crate) const ARG_BASE_URL: &str = "base-url";
pub(crate) const ARG_CODE: &str = "code";
pub(crate) const ENV_DOWNLOAD_DATA_DIR: &str = "APTDATA_CMDS_DOWNLOAD_DATA_DIR";
pub(crate) const ENV_LOAD_DATABASE: &str = "APTDATA_CMDS_LOAD_DATABASE";
pub(crate) const ENV_LOAD_DATA_DIR: &str = "APTDATA_CMDS_LOAD_DATA_DIR";
pub(crate) const ENV_LOOKUP_DATABASE: &str = "APTDATA_CMDS_LOOKUP_DATABASE";
pub(crate) const ENV_LOOKUP_CODE: &str = "APTDATA_CMDS_LOOKUP_CODE";
pub(crate) const ENV_VALIDATE_DATABASE: &str = "APTDATA_CMDS_VALIDATE_DATABASE";

/// Run the aptdata CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Download(args) => run_download(args, writer),
        Command::Load(args) => run_load(args, writer),
        Command::Airport(args) => run_lookup(LookupKind::Airport, args, writer),
        Command::Runways(args) => run_lookup(LookupKind::Runways, args, writer),
        Command::Country(args) => run_lookup(LookupKind::Country, args, writer),
        Command::Region(args) => run_lookup(LookupKind::Region, args, writer),
        Command::Validate(args) => run_validate(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "aptdata",
    about = "Build and query a local airport reference database",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch the OurAirports CSV exports into a data directory.
    Download(DownloadArgs),
    /// Load the CSV exports from a data directory into the catalog.
    Load(LoadArgs),
    /// Print one airport as JSON.
    Airport(LookupArgs),
    /// Print the runways of one airport as JSON.
    Runways(LookupArgs),
    /// Print one country as JSON.
    Country(LookupArgs),
    /// Print one region as JSON.
    Region(LookupArgs),
    /// Report codes that point at records missing from the catalog.
    Validate(ValidateArgs),
}

/// Write `value` to `writer` as pretty-printed JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
