//! Download-and-cache manager for Kaggle datasets.

use std::{fs, path::PathBuf};

use hubmap_core::{DownloadError, DownloadManager};
use tracing::{info, instrument, warn};

use crate::{
    archive::{extract_zip, write_atomic_with},
    client::{DownloadClient, UreqDownloadClient},
    config::KaggleConfig,
    reference::DatasetRef,
};

/// Fetches Kaggle dataset archives and caches their extracted contents.
///
/// Archives land in [`KaggleConfig::archives_dir`] as `<owner>/<slug>.zip`
/// and are extracted to [`KaggleConfig::extracted_dir`] as `<owner>/<slug>`.
/// Both steps are skipped when their output already exists.
#[derive(Debug)]
pub struct KaggleDownloadManager<C = UreqDownloadClient> {
    config: KaggleConfig,
    client: C,
}

impl KaggleDownloadManager {
    /// Creates a manager using the default HTTP client.
    #[must_use]
    pub fn new(config: KaggleConfig) -> Self {
        Self::with_client(config, UreqDownloadClient)
    }
}

impl<C: DownloadClient> KaggleDownloadManager<C> {
    /// Creates a manager with a custom transport.
    #[must_use]
    pub fn with_client(config: KaggleConfig, client: C) -> Self {
        Self { config, client }
    }

    /// Returns the manager configuration.
    #[must_use]
    pub fn config(&self) -> &KaggleConfig {
        &self.config
    }

    /// Returns the transport.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    fn download_url(&self, dataset: &DatasetRef) -> String {
        format!(
            "{}/datasets/download/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            dataset.owner(),
            dataset.slug()
        )
    }

    fn archive_path(&self, dataset: &DatasetRef) -> PathBuf {
        self.config
            .archives_dir()
            .join(dataset.owner())
            .join(format!("{}.zip", dataset.slug()))
    }
}

impl<C: DownloadClient> DownloadManager for KaggleDownloadManager<C> {
    #[instrument(name = "kaggle.download", err, skip(self, reference), fields(reference = reference))]
    fn download_kaggle_data(&self, reference: &str) -> Result<PathBuf, DownloadError> {
        let dataset = DatasetRef::parse(reference)?;
        let extracted = self.config.extracted_dir().join(dataset.relative_path());
        if extracted.is_dir() {
            info!(path = %extracted.display(), "using cached dataset");
            return Ok(extracted);
        }

        let archive = self.archive_path(&dataset);
        if !archive.is_file() {
            let url = self.download_url(&dataset);
            let bytes = write_atomic_with(&archive, |out| {
                self.client
                    .download(&url, self.config.credentials.as_ref(), out)
            })?;
            info!(%url, bytes, "downloaded dataset archive");
        }

        if let Err(error) = extract_zip(&archive, &extracted) {
            if matches!(error, DownloadError::Archive { .. }) {
                warn!(path = %archive.display(), "discarding unreadable cached archive");
                fs::remove_file(&archive)?;
            }
            return Err(error);
        }
        info!(path = %extracted.display(), "extracted dataset archive");
        Ok(extracted)
    }
}
