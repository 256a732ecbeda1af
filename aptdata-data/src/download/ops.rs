use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8::Dir;
use futures_util::future::try_join_all;
use log::{debug, info, warn};

use super::source::SourceFetcher;
use super::{DownloadError, DownloadOptions, DownloadReport};

/// Download every configured source file into `dest_dir`.
///
/// The directory is created when missing. Files are fetched concurrently and
/// the first failure cancels the rest of the batch. A file that was not fully
/// written, whether it failed or was cancelled, is removed; existing files
/// are truncated before they are rewritten.
///
/// # Examples
/// ```no_run
/// # use aptdata_data::{DEFAULT_BASE_URL, DownloadOptions, HttpSourceFetcher, download_sources};
/// # use camino::Utf8Path;
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = HttpSourceFetcher::new(DEFAULT_BASE_URL)?;
/// let runtime = tokio::runtime::Builder::new_current_thread()
///     .enable_all()
///     .build()?;
/// let reports = runtime.block_on(download_sources(
///     &fetcher,
///     Utf8Path::new("var/sources"),
///     &DownloadOptions::default(),
/// ))?;
/// assert_eq!(reports.len(), 4);
/// # Ok(())
/// # }
/// ```
pub async fn download_sources<F: SourceFetcher + ?Sized>(
    fetcher: &F,
    dest_dir: &Utf8Path,
    options: &DownloadOptions,
) -> Result<Vec<DownloadReport>, DownloadError> {
    aptdata_fs::ensure_dir(dest_dir).map_err(|source| DownloadError::CreateDir {
        path: dest_dir.to_path_buf(),
        source,
    })?;
    let downloads = options
        .files
        .names()
        .into_iter()
        .map(|file_name| download_file(fetcher, dest_dir, file_name));
    let reports = try_join_all(downloads).await?;
    let bytes: u64 = reports.iter().map(|report| report.bytes_written).sum();
    info!(
        "downloaded {} source files ({bytes} bytes) from {} into {dest_dir}",
        reports.len(),
        fetcher.base_url()
    );
    Ok(reports)
}

async fn download_file<F: SourceFetcher + ?Sized>(
    fetcher: &F,
    dest_dir: &Utf8Path,
    file_name: &str,
) -> Result<DownloadReport, DownloadError> {
    let output_path = dest_dir.join(file_name);
    let write_error = |source| DownloadError::WriteFile {
        path: output_path.clone(),
        source,
    };
    let url = fetcher.base_url().file_url(file_name);
    let (dir, name) = aptdata_fs::open_parent_dir(&output_path).map_err(write_error)?;

    let mut partial = PartialFile::new(&dir, &name, &output_path);
    let mut file = dir.create(&name).map_err(write_error)?;
    let bytes_written = fetcher
        .fetch(&url, &mut file)
        .await
        .map_err(|source| DownloadError::Transport {
            file: file_name.to_owned(),
            source,
        })?;
    file.flush().map_err(write_error)?;
    file.sync_all().map_err(write_error)?;
    drop(file);
    partial.keep();

    debug!("wrote {bytes_written} bytes from {url} to {output_path}");
    Ok(DownloadReport {
        file_name: file_name.to_owned(),
        url,
        bytes_written,
        output_path: output_path.clone(),
    })
}

/// Removes the file it guards when dropped unless [`PartialFile::keep`] ran.
struct PartialFile<'a> {
    dir: &'a Dir,
    name: &'a str,
    path: &'a Utf8PathBuf,
    keep: bool,
}

impl<'a> PartialFile<'a> {
    const fn new(dir: &'a Dir, name: &'a str, path: &'a Utf8PathBuf) -> Self {
        Self {
            dir,
            name,
            path,
            keep: false,
        }
    }

    const fn keep(&mut self) {
        self.keep = true;
    }
}

impl Drop for PartialFile<'_> {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        match self.dir.remove_file(self.name) {
            Ok(()) => debug!("removed incomplete download {}", self.path),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => warn!("failed to remove incomplete download {}: {err}", self.path),
        }
    }
}
