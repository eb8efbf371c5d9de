use std::path::{Path, PathBuf};
use std::vec;

use hubmap_core::{
    BuilderConfig, DatasetBuilder, DatasetError, DatasetInfo, DownloadError, DownloadManager,
    Example, Feature, FeaturesDict, FilePayload, ImageEncoding, Payload, Result, Split,
    SplitGenerator, Version,
};

pub const CONFIG: BuilderConfig = BuilderConfig::new("tiny", Version::new(0, 1, 0), "Tiny demo");

/// Builder that yields one record per `<split>.png` file under the split root.
pub struct Dummy;

impl DatasetBuilder for Dummy {
    type Examples = vec::IntoIter<Result<(String, Example)>>;

    fn config(&self) -> &BuilderConfig {
        &CONFIG
    }

    fn info(&self) -> DatasetInfo {
        DatasetInfo {
            name: "dummy".into(),
            config_name: CONFIG.name().into(),
            config_description: CONFIG.description().into(),
            version: CONFIG.version(),
            description: "demo".into(),
            citation: String::new(),
            homepage: "https://example.test".into(),
            features: FeaturesDict::new()
                .with("image", Feature::image(3, ImageEncoding::Png))
                .with("id", Feature::Text),
            supervised_keys: None,
        }
    }

    fn split_generators(
        &self,
        download_manager: &dyn DownloadManager,
    ) -> Result<Vec<SplitGenerator>> {
        let reference = "demo/tiny";
        let path = download_manager
            .download_kaggle_data(reference)
            .map_err(|source| DatasetError::Download {
                reference: reference.to_owned(),
                source,
            })?;
        Ok(vec![
            SplitGenerator::new(Split::Train, path.clone()),
            SplitGenerator::new(Split::Test, path),
        ])
    }

    fn generate_examples(&self, path: &Path, split: Split) -> Self::Examples {
        let file = path.join(format!("{split}.png"));
        let item = FilePayload::open(&file)
            .and_then(|image| {
                let mask = FilePayload::open(&file)?;
                Ok((
                    split.to_string(),
                    Example {
                        id: split.to_string(),
                        image,
                        mask: Payload::File(mask),
                    },
                ))
            })
            .map_err(|source| DatasetError::OpenImage { path: file, source });
        vec![item].into_iter()
    }
}

/// Resolves every reference to a fixed directory.
pub struct FixedManager(pub PathBuf);

impl DownloadManager for FixedManager {
    fn download_kaggle_data(&self, _reference: &str) -> std::result::Result<PathBuf, DownloadError> {
        Ok(self.0.clone())
    }
}

/// Fails every reference.
pub struct FailingManager;

impl DownloadManager for FailingManager {
    fn download_kaggle_data(&self, reference: &str) -> std::result::Result<PathBuf, DownloadError> {
        Err(DownloadError::Missing {
            reference: reference.to_owned(),
            path: PathBuf::from("/nowhere"),
        })
    }
}
