//! The collaborator that turns remote data references into local paths.

use std::path::PathBuf;

use crate::error::DownloadError;

/// Resolves a named remote dataset reference to a local extracted directory.
///
/// Implementations own fetching, extraction, and caching. Builders only
/// derive reference strings and forward failures unchanged.
///
/// # Examples
/// ```
/// use std::path::PathBuf;
/// use hubmap_core::{DownloadError, DownloadManager};
///
/// struct Fixed(PathBuf);
///
/// impl DownloadManager for Fixed {
///     fn download_kaggle_data(&self, reference: &str) -> Result<PathBuf, DownloadError> {
///         Ok(self.0.join(reference))
///     }
/// }
///
/// let manager = Fixed(PathBuf::from("/cache"));
/// let path = manager.download_kaggle_data("owner/slug")?;
/// assert_eq!(path, PathBuf::from("/cache/owner/slug"));
/// # Ok::<(), DownloadError>(())
/// ```
pub trait DownloadManager {
    /// Returns the local root of the extracted Kaggle dataset `reference`
    /// (`owner/slug`).
    ///
    /// # Errors
    /// Returns [`DownloadError`] when the reference is malformed or cannot be
    /// acquired.
    fn download_kaggle_data(&self, reference: &str) -> Result<PathBuf, DownloadError>;
}

impl<T: DownloadManager + ?Sized> DownloadManager for &T {
    fn download_kaggle_data(&self, reference: &str) -> Result<PathBuf, DownloadError> {
        (**self).download_kaggle_data(reference)
    }
}
