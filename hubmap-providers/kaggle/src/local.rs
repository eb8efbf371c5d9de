//! Offline resolution of dataset references against an extracted tree.

use std::path::{Path, PathBuf};

use hubmap_core::{DownloadError, DownloadManager};
use tracing::debug;

use crate::{config::KaggleConfig, reference::DatasetRef};

/// Resolves `owner/slug` to `<root>/<owner>/<slug>` without network access.
#[derive(Clone, Debug)]
pub struct LocalDownloadManager {
    root: PathBuf,
}

impl LocalDownloadManager {
    /// Creates a manager serving datasets below `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Serves the trees a [`crate::KaggleDownloadManager`] with `config` extracted.
    #[must_use]
    pub fn from_config(config: &KaggleConfig) -> Self {
        Self::new(config.extracted_dir())
    }

    /// Returns the directory datasets are resolved under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DownloadManager for LocalDownloadManager {
    fn download_kaggle_data(&self, reference: &str) -> Result<PathBuf, DownloadError> {
        let dataset = DatasetRef::parse(reference)?;
        let path = self.root.join(dataset.relative_path());
        if !path.is_dir() {
            return Err(DownloadError::Missing {
                reference: reference.to_owned(),
                path,
            });
        }
        debug!(%dataset, path = %path.display(), "resolved local dataset");
        Ok(path)
    }
}
