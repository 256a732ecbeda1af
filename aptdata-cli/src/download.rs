//! Download command implementation for the aptdata CLI.

use std::io::Write;

use aptdata_data::{
    BaseUrl, DownloadOptions, DownloadReport, HttpSourceFetcher, SourceFetcher, download_sources,
};
use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tokio::runtime::Builder;

use crate::{ARG_BASE_URL, ARG_DATA_DIR, CliError, ENV_DOWNLOAD_DATA_DIR, write_json};

/// CLI arguments for the `download` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "download",
    long_about = "Fetch airports.csv, runways.csv, countries.csv and \
                 regions.csv from the OurAirports data site into a local \
                 directory. Files are fetched concurrently; if any fails, \
                 the others are abandoned and no partial file is kept.",
    about = "Fetch the OurAirports CSV exports"
)]
#[ortho_config(prefix = "APTDATA")]
pub(crate) struct DownloadArgs {
    /// Directory the CSV files are written into.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Base URL the files are fetched from.
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
}

impl DownloadArgs {
    pub(crate) fn into_config(self) -> Result<DownloadConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        DownloadConfig::try_from(merged)
    }
}

/// Resolved `download` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DownloadConfig {
    pub(crate) data_dir: Utf8PathBuf,
    pub(crate) base_url: BaseUrl,
}

impl TryFrom<DownloadArgs> for DownloadConfig {
    type Error = CliError;

    fn try_from(args: DownloadArgs) -> Result<Self, Self::Error> {
        let data_dir = args.data_dir.ok_or(CliError::MissingArgument {
            field: ARG_DATA_DIR,
            env: ENV_DOWNLOAD_DATA_DIR,
        })?;
        let base_url = args.base_url.map(BaseUrl::new).unwrap_or_default();
        Ok(Self { data_dir, base_url })
    }
}

pub(crate) fn run_download(args: DownloadArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let fetcher = HttpSourceFetcher::new(config.base_url.clone().into_inner())?;
    run_download_with(&config, &fetcher, writer)
}

pub(crate) fn run_download_with(
    config: &DownloadConfig,
    fetcher: &dyn SourceFetcher,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let reports = fetch_all(config, fetcher)?;
    write_json(writer, &reports)
}

fn fetch_all(
    config: &DownloadConfig,
    fetcher: &dyn SourceFetcher,
) -> Result<Vec<DownloadReport>, CliError> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let reports = runtime.block_on(download_sources(
        fetcher,
        &config.data_dir,
        &DownloadOptions::default(),
    ))?;
    Ok(reports)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<DownloadConfig, CliError> {
    let merged = DownloadArgs::merge_from_layers(layers).map_err(CliError::from)?;
    DownloadConfig::try_from(merged)
}
