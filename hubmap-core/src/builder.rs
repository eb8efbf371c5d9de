//! Dataset builder abstraction.
//!
//! A builder describes one dataset under one selected configuration, resolves
//! its splits through a [`DownloadManager`], and enumerates records from the
//! resolved local paths.

use std::path::Path;

use crate::{
    Result,
    download::DownloadManager,
    example::Example,
    info::DatasetInfo,
    split::{Split, SplitGenerator},
    version::Version,
};

/// Named parameter set shared by every configuration of a dataset.
///
/// # Examples
/// ```
/// use hubmap_core::{BuilderConfig, Version};
///
/// const SMALL: BuilderConfig = BuilderConfig::new("small", Version::new(1, 0, 0), "Small crops");
/// assert_eq!(SMALL.name(), "small");
/// assert_eq!(SMALL.version().to_string(), "1.0.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuilderConfig {
    name: &'static str,
    version: Version,
    description: &'static str,
}

impl BuilderConfig {
    /// Creates a configuration descriptor.
    #[must_use]
    pub const fn new(name: &'static str, version: Version, description: &'static str) -> Self {
        Self {
            name,
            version,
            description,
        }
    }

    /// Returns the configuration name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the configuration version.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Returns the configuration description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }
}

/// A dataset that can describe itself, resolve its splits, and enumerate its
/// records.
pub trait DatasetBuilder {
    /// Lazy, single-pass sequence of `(key, record)` pairs.
    type Examples: Iterator<Item = Result<(String, Example)>>;

    /// Returns the selected configuration.
    fn config(&self) -> &BuilderConfig;

    /// Returns dataset metadata for the selected configuration.
    fn info(&self) -> DatasetInfo;

    /// Acquires raw data through `download_manager` and returns one
    /// descriptor per split.
    ///
    /// # Errors
    /// Returns [`crate::DatasetError::Download`] when acquisition fails.
    fn split_generators(
        &self,
        download_manager: &dyn DownloadManager,
    ) -> Result<Vec<SplitGenerator>>;

    /// Enumerates the records of `split` rooted at `path`.
    ///
    /// Failures surface as `Err` items from the returned iterator.
    fn generate_examples(&self, path: &Path, split: Split) -> Self::Examples;

    /// Resolves every split and pairs it with its example iterator.
    ///
    /// # Errors
    /// Returns any error raised by [`Self::split_generators`].
    fn splits(
        &self,
        download_manager: &dyn DownloadManager,
    ) -> Result<Vec<(Split, Self::Examples)>> {
        let generators = self.split_generators(download_manager)?;
        Ok(generators
            .into_iter()
            .map(|generator| {
                let kwargs = generator.gen_kwargs;
                (
                    generator.name,
                    self.generate_examples(&kwargs.path, kwargs.split),
                )
            })
            .collect())
    }
}
