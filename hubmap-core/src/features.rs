//! Feature schema declarations describing the fields of each record.

use std::collections::BTreeMap;

use serde::Serialize;

/// Encoding used when an image feature is serialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageEncoding {
    /// Portable Network Graphics.
    Png,
}

impl ImageEncoding {
    /// Returns the lowercase encoding name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
        }
    }
}

/// Declared image shape. `None` dimensions accept any size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ImageShape {
    /// Fixed height in pixels, if any.
    pub height: Option<u32>,
    /// Fixed width in pixels, if any.
    pub width: Option<u32>,
    /// Number of colour channels.
    pub channels: u8,
}

impl ImageShape {
    /// Shape with arbitrary width and height and a fixed channel count.
    ///
    /// # Examples
    /// ```
    /// use hubmap_core::ImageShape;
    ///
    /// let shape = ImageShape::any_size(3);
    /// assert_eq!(shape.height, None);
    /// assert_eq!(shape.channels, 3);
    /// ```
    #[must_use]
    pub const fn any_size(channels: u8) -> Self {
        Self {
            height: None,
            width: None,
            channels,
        }
    }
}

/// A single field of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Feature {
    /// Encoded image bytes.
    Image {
        /// Declared shape.
        shape: ImageShape,
        /// Declared encoding.
        encoding: ImageEncoding,
    },
    /// UTF-8 text.
    Text,
}

impl Feature {
    /// Declares an image feature of any size with `channels` channels.
    #[must_use]
    pub const fn image(channels: u8, encoding: ImageEncoding) -> Self {
        Self::Image {
            shape: ImageShape::any_size(channels),
            encoding,
        }
    }

    /// Returns the channel count for image features.
    #[must_use]
    pub const fn channels(&self) -> Option<u8> {
        match self {
            Self::Image { shape, .. } => Some(shape.channels),
            Self::Text => None,
        }
    }

    /// Returns the encoding for image features.
    #[must_use]
    pub const fn encoding(&self) -> Option<ImageEncoding> {
        match self {
            Self::Image { encoding, .. } => Some(*encoding),
            Self::Text => None,
        }
    }
}

/// Named collection of features forming a record schema.
///
/// # Examples
/// ```
/// use hubmap_core::{Feature, FeaturesDict, ImageEncoding};
///
/// let features = FeaturesDict::new()
///     .with("image", Feature::image(3, ImageEncoding::Png))
///     .with("id", Feature::Text);
/// assert_eq!(features.len(), 2);
/// assert_eq!(features.get("image").and_then(Feature::channels), Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FeaturesDict {
    fields: BTreeMap<String, Feature>,
}

impl FeaturesDict {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a named feature.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, feature: Feature) -> Self {
        self.fields.insert(name.into(), feature);
        self
    }

    /// Looks up a feature by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Feature> {
        self.fields.get(name)
    }

    /// Returns the number of declared features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether no features are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over features in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Feature)> {
        self.fields.iter().map(|(name, feature)| (name.as_str(), feature))
    }
}
