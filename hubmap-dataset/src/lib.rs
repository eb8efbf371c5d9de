//! HuBMAP kidney-tissue segmentation dataset, as re-packaged on Kaggle.
//!
//! [`HubmapKaggle`] exposes three resolution variants of the training crops
//! plus a fixed 256x256 unlabelled test set through the
//! [`hubmap_core::DatasetBuilder`] interface.
//!
//! # Examples
//! ```
//! use hubmap_core::DatasetBuilder;
//! use hubmap_dataset::HubmapKaggle;
//!
//! let builder = HubmapKaggle::from_config_name("512x512")?;
//! assert_eq!(builder.size(), 512);
//! assert_eq!(builder.train_reference(), "iafoss/hubmap-512x512");
//! assert_eq!(builder.info().features.get("mask").and_then(|f| f.channels()), Some(1));
//! # Ok::<(), hubmap_core::DatasetError>(())
//! ```

mod builder;
mod config;
mod examples;

pub use builder::{DATASET_NAME, HubmapKaggle, TEST_DATA_REF, TRAIN_DATA_REF_PREFIX};
pub use config::{HubmapKaggleConfig, VERSION, builder_configs};
pub use examples::{
    Examples, PLACEHOLDER_MASK_CHANNELS, PLACEHOLDER_MASK_SIZE, example_id, mask_path_for,
};
