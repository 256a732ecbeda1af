//! Load command implementation for the aptdata CLI.

use std::io::Write;

use aptdata_data::{AptDb, LoadOptions, LoadReport, ParseMode};
use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATA_DIR, ARG_DATABASE, ARG_RELOAD, ARG_STRICT, CliError, ENV_LOAD_DATA_DIR,
    ENV_LOAD_DATABASE, write_json,
};

/// CLI arguments for the `load` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "load",
    long_about = "Load airports, runways, countries and regions from the \
                 CSV exports in a data directory. With --reload every \
                 catalog bucket is cleared first, so records missing from \
                 the new exports disappear.",
    about = "Load the CSV exports into the catalog"
)]
#[ortho_config(prefix = "APTDATA")]
pub(crate) struct LoadArgs {
    /// Path to the catalog database file.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Directory holding the CSV exports.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Reject rows whose numeric or boolean fields fail to parse.
    #[arg(
        long = ARG_STRICT,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) strict: Option<bool>,
    /// Clear every catalog bucket before loading.
    #[arg(
        long = ARG_RELOAD,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) reload: Option<bool>,
}

impl LoadArgs {
    pub(crate) fn into_config(self) -> Result<LoadConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        LoadConfig::try_from(merged)
    }
}

/// Resolved `load` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LoadConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) data_dir: Utf8PathBuf,
    pub(crate) options: LoadOptions,
    pub(crate) reload: bool,
}

impl TryFrom<LoadArgs> for LoadConfig {
    type Error = CliError;

    fn try_from(args: LoadArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_LOAD_DATABASE,
        })?;
        let data_dir = args.data_dir.ok_or(CliError::MissingArgument {
            field: ARG_DATA_DIR,
            env: ENV_LOAD_DATA_DIR,
        })?;
        let parse_mode = if args.strict.unwrap_or(false) {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        };
        Ok(Self {
            database,
            data_dir,
            options: LoadOptions {
                parse_mode,
                ..LoadOptions::default()
            },
            reload: args.reload.unwrap_or(false),
        })
    }
}

pub(crate) fn run_load(args: LoadArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_load_with(&config, writer)
}

pub(crate) fn run_load_with(config: &LoadConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let report = execute_load(config)?;
    write_json(writer, &report)
}

fn execute_load(config: &LoadConfig) -> Result<LoadReport, CliError> {
    let catalog_error = |source| CliError::catalog(&config.database, source);
    let mut db = AptDb::open(&config.database).map_err(catalog_error)?;
    let report = if config.reload {
        db.reload_with(&config.data_dir, &config.options)
    } else {
        db.load_with(&config.data_dir, &config.options)
    }
    .map_err(catalog_error)?;
    db.close().map_err(catalog_error)?;
    info!(
        "catalog {} now holds {} records from {}",
        config.database,
        report.records(),
        config.data_dir
    );
    Ok(report)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<LoadConfig, CliError> {
    let merged = LoadArgs::merge_from_layers(layers).map_err(CliError::from)?;
    LoadConfig::try_from(merged)
}
