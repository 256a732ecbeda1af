//! Lookup and validation commands for the aptdata CLI.

use std::io::Write;

use aptdata_data::{AptDb, CatalogError};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CODE, ARG_DATABASE, CliError, ENV_LOOKUP_CODE, ENV_LOOKUP_DATABASE,
    ENV_VALIDATE_DATABASE, write_json,
};

/// Record family a lookup command prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LookupKind {
    Airport,
    Runways,
    Country,
    Region,
}

/// CLI arguments shared by the `airport`, `runways`, `country` and `region`
/// subcommands.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "lookup",
    long_about = "Look up a record by code in a populated catalog and print \
                 it as JSON. Airports are keyed by ident, countries by ISO \
                 country code and regions by ISO region code.",
    about = "Print a catalog record as JSON"
)]
#[ortho_config(prefix = "APTDATA")]
pub(crate) struct LookupArgs {
    /// Code of the record to print.
    #[arg(value_name = ARG_CODE)]
    #[serde(default)]
    pub(crate) code: Option<String>,
    /// Path to the catalog database file.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
}

impl LookupArgs {
    pub(crate) fn into_config(self) -> Result<LookupConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        LookupConfig::try_from(merged)
    }
}

/// Resolved lookup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LookupConfig {
    pub(crate) code: String,
    pub(crate) database: Utf8PathBuf,
}

impl TryFrom<LookupArgs> for LookupConfig {
    type Error = CliError;

    fn try_from(args: LookupArgs) -> Result<Self, Self::Error> {
        let code = args.code.ok_or(CliError::MissingArgument {
            field: ARG_CODE,
            env: ENV_LOOKUP_CODE,
        })?;
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_LOOKUP_DATABASE,
        })?;
        Ok(Self { code, database })
    }
}

pub(crate) fn run_lookup(
    kind: LookupKind,
    args: LookupArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_lookup_with(kind, &config, writer)
}

pub(crate) fn run_lookup_with(
    kind: LookupKind,
    config: &LookupConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let db = open_populated(&config.database)?;
    let catalog_error = |source: CatalogError| CliError::catalog(&config.database, source);
    let code = config.code.as_str();
    match kind {
        LookupKind::Airport => write_json(writer, &db.airport(code).map_err(catalog_error)?),
        LookupKind::Runways => write_json(writer, &db.runways(code).map_err(catalog_error)?),
        LookupKind::Country => write_json(writer, &db.country(code).map_err(catalog_error)?),
        LookupKind::Region => write_json(writer, &db.region(code).map_err(catalog_error)?),
    }
}

/// CLI arguments for the `validate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "validate",
    long_about = "Scan a populated catalog for codes that point at missing \
                 records: runways of unknown airports, airports naming an \
                 unknown country or region, and regions naming an unknown \
                 country. The findings are printed as JSON.",
    about = "Report dangling references in the catalog"
)]
#[ortho_config(prefix = "APTDATA")]
pub(crate) struct ValidateArgs {
    /// Path to the catalog database file.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
}

pub(crate) fn run_validate(args: ValidateArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let database = validate_database(merged)?;
    run_validate_with(&database, writer)
}

fn validate_database(args: ValidateArgs) -> Result<Utf8PathBuf, CliError> {
    args.database.ok_or(CliError::MissingArgument {
        field: ARG_DATABASE,
        env: ENV_VALIDATE_DATABASE,
    })
}

pub(crate) fn run_validate_with(
    database: &Utf8Path,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let db = open_populated(database)?;
    let report = db
        .validate_references()
        .map_err(|source| CliError::catalog(database, source))?;
    write_json(writer, &report)
}

fn open_populated(database: &Utf8Path) -> Result<AptDb, CliError> {
    let catalog_error = |source: CatalogError| CliError::catalog(database, source);
    let db = AptDb::open(database).map_err(catalog_error)?;
    db.require_populated().map_err(catalog_error)?;
    Ok(db)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<LookupConfig, CliError> {
    let merged = LookupArgs::merge_from_layers(layers).map_err(CliError::from)?;
    LookupConfig::try_from(merged)
}
