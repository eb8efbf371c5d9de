//! Dataset metadata returned by [`crate::DatasetBuilder::info`].

use serde::Serialize;

use crate::{features::FeaturesDict, version::Version};

/// Pair of feature names forming an `(input, target)` tuple for supervised
/// training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupervisedKeys {
    /// Input feature name.
    pub input: String,
    /// Target feature name.
    pub target: String,
}

/// Structured description of a dataset under one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetInfo {
    /// Registered dataset name.
    pub name: String,
    /// Name of the selected configuration.
    pub config_name: String,
    /// Description of the selected configuration.
    pub config_description: String,
    /// Version of the selected configuration.
    pub version: Version,
    /// Free-form dataset description.
    pub description: String,
    /// BibTeX citation, possibly empty.
    pub citation: String,
    /// Dataset homepage.
    pub homepage: String,
    /// Record schema.
    pub features: FeaturesDict,
    /// Supervised `(input, target)` pair, if declared.
    pub supervised_keys: Option<SupervisedKeys>,
}

impl DatasetInfo {
    /// Returns the fully qualified `name/config:version` identifier.
    ///
    /// # Examples
    /// ```
    /// use hubmap_core::{DatasetInfo, FeaturesDict, Version};
    ///
    /// let info = DatasetInfo {
    ///     name: "demo".into(),
    ///     config_name: "small".into(),
    ///     config_description: String::new(),
    ///     version: Version::new(1, 0, 0),
    ///     description: String::new(),
    ///     citation: String::new(),
    ///     homepage: String::new(),
    ///     features: FeaturesDict::new(),
    ///     supervised_keys: None,
    /// };
    /// assert_eq!(info.full_name(), "demo/small:1.0.0");
    /// ```
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}:{}", self.name, self.config_name, self.version)
    }
}
