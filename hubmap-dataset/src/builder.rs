//! The HuBMAP Kaggle dataset builder.

use std::path::{Path, PathBuf};

use hubmap_core::{
    BuilderConfig, DatasetBuilder, DatasetError, DatasetInfo, DownloadManager, Feature,
    FeaturesDict, ImageEncoding, Result, Split, SplitGenerator, SupervisedKeys,
};
use tracing::{info, instrument};

use crate::config::{HubmapKaggleConfig, builder_configs, find_config};
use crate::examples::Examples;

/// Registered dataset name.
pub const DATASET_NAME: &str = "hubmap_kaggle";
/// Kaggle reference prefix for the training archives; the variant suffix is
/// `-{size}x{size}`.
pub const TRAIN_DATA_REF_PREFIX: &str = "iafoss/hubmap";
/// Kaggle reference of the test archive, shared by every variant.
pub const TEST_DATA_REF: &str = "joshi98kishan/hubmap-256x256-test-data";

const DESCRIPTION: &str = "\
HuBMAP kidney tissue segmentation data as processed on Kaggle by `iafoss` \
and `joshi98kishan`.
Image shapes:
  Train: 256/512/1024
  Test: 256
";
const CITATION: &str = "";
const HOMEPAGE: &str = "https://kaggle/datasets/";

/// Builder for one resolution variant of the HuBMAP Kaggle dataset.
///
/// # Examples
/// ```
/// use hubmap_core::DatasetBuilder;
/// use hubmap_dataset::{HubmapKaggle, builder_configs};
///
/// let builder = HubmapKaggle::default();
/// assert_eq!(builder.config().name(), builder_configs()[0].name());
/// assert_eq!(builder.test_reference(), "joshi98kishan/hubmap-256x256-test-data");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubmapKaggle {
    config: &'static HubmapKaggleConfig,
}

impl Default for HubmapKaggle {
    fn default() -> Self {
        Self::new(&builder_configs()[0])
    }
}

impl HubmapKaggle {
    /// Creates a builder for `config`.
    #[must_use]
    pub const fn new(config: &'static HubmapKaggleConfig) -> Self {
        Self { config }
    }

    /// Selects a registered variant by name.
    ///
    /// # Errors
    /// Returns [`DatasetError::UnknownConfig`] when `name` is not registered.
    pub fn from_config_name(name: &str) -> Result<Self> {
        find_config(name)
            .map(Self::new)
            .ok_or_else(|| DatasetError::UnknownConfig {
                name: name.to_owned(),
                available: builder_configs()
                    .iter()
                    .map(HubmapKaggleConfig::name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Returns the selected variant.
    #[must_use]
    pub const fn variant(&self) -> &'static HubmapKaggleConfig {
        self.config
    }

    /// Returns the crop size of the selected variant.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.config.size()
    }

    /// Returns the Kaggle reference of the training archive for this variant.
    #[must_use]
    pub fn train_reference(&self) -> String {
        let size = self.size();
        format!("{TRAIN_DATA_REF_PREFIX}-{size}x{size}")
    }

    /// Returns the Kaggle reference of the test archive.
    #[must_use]
    pub const fn test_reference(&self) -> &'static str {
        TEST_DATA_REF
    }

    /// Returns dataset metadata; identical to [`DatasetBuilder::info`].
    #[must_use]
    pub fn describe(&self) -> DatasetInfo {
        let config = self.config.builder_config();
        DatasetInfo {
            name: DATASET_NAME.to_owned(),
            config_name: config.name().to_owned(),
            config_description: config.description().to_owned(),
            version: config.version(),
            description: DESCRIPTION.to_owned(),
            citation: CITATION.to_owned(),
            homepage: HOMEPAGE.to_owned(),
            features: FeaturesDict::new()
                .with("image", Feature::image(3, ImageEncoding::Png))
                .with("mask", Feature::image(1, ImageEncoding::Png))
                .with("id", Feature::Text),
            supervised_keys: Some(SupervisedKeys {
                input: "image".to_owned(),
                target: "mask".to_owned(),
            }),
        }
    }
}

impl DatasetBuilder for HubmapKaggle {
    type Examples = Examples;

    fn config(&self) -> &BuilderConfig {
        self.config.builder_config()
    }

    fn info(&self) -> DatasetInfo {
        self.describe()
    }

    #[instrument(
        name = "dataset.split_generators",
        err,
        skip(self, download_manager),
        fields(config = self.config.name()),
    )]
    fn split_generators(
        &self,
        download_manager: &dyn DownloadManager,
    ) -> Result<Vec<SplitGenerator>> {
        let train_path = acquire(download_manager, &self.train_reference())?;
        let test_path = acquire(download_manager, self.test_reference())?;
        info!(
            train = %train_path.display(),
            test = %test_path.display(),
            "resolved split roots"
        );
        Ok(vec![
            SplitGenerator::new(Split::Train, train_path),
            SplitGenerator::new(Split::Test, test_path),
        ])
    }

    fn generate_examples(&self, path: &Path, split: Split) -> Examples {
        Examples::new(path, split)
    }
}

fn acquire(download_manager: &dyn DownloadManager, reference: &str) -> Result<PathBuf> {
    download_manager
        .download_kaggle_data(reference)
        .map_err(|source| DatasetError::Download {
            reference: reference.to_owned(),
            source,
        })
}
