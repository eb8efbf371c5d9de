//! Parsed `owner/slug` Kaggle dataset references.

use std::{fmt, path::PathBuf, str::FromStr};

use hubmap_core::DownloadError;

/// A Kaggle dataset reference.
///
/// # Examples
/// ```
/// use hubmap_providers_kaggle::DatasetRef;
///
/// let reference = DatasetRef::parse("iafoss/hubmap-256x256")?;
/// assert_eq!(reference.owner(), "iafoss");
/// assert_eq!(reference.slug(), "hubmap-256x256");
/// assert_eq!(reference.to_string(), "iafoss/hubmap-256x256");
/// # Ok::<(), hubmap_core::DownloadError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetRef {
    owner: String,
    slug: String,
}

impl DatasetRef {
    /// Parses `owner/slug`.
    ///
    /// # Errors
    /// Returns [`DownloadError::InvalidReference`] unless the reference has
    /// exactly two non-empty segments that are safe to use as path components.
    pub fn parse(reference: &str) -> Result<Self, DownloadError> {
        let invalid = || DownloadError::InvalidReference {
            reference: reference.to_owned(),
        };
        let (owner, slug) = reference.split_once('/').ok_or_else(invalid)?;
        if !is_path_safe(owner) || !is_path_safe(slug) {
            return Err(invalid());
        }
        Ok(Self {
            owner: owner.to_owned(),
            slug: slug.to_owned(),
        })
    }

    /// Returns the dataset owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the dataset slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns `owner/slug` as a relative path.
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(&self.owner).join(&self.slug)
    }
}

fn is_path_safe(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
}

impl fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.slug)
    }
}

impl FromStr for DatasetRef {
    type Err = DownloadError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}
