//! Split identifiers and the descriptors handed back by split resolution.

use std::{fmt, path::PathBuf, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// A named partition of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    /// Labelled training partition.
    Train,
    /// Unlabelled test partition.
    Test,
}

impl Split {
    /// Returns the lowercase split name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a split name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown split `{0}`; expected `train` or `test`")]
pub struct ParseSplitError(pub String);

impl FromStr for Split {
    type Err = ParseSplitError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "train" => Ok(Self::Train),
            "test" => Ok(Self::Test),
            other => Err(ParseSplitError(other.to_owned())),
        }
    }
}

/// Arguments forwarded to [`crate::DatasetBuilder::generate_examples`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenKwargs {
    /// Local root of the extracted split data.
    pub path: PathBuf,
    /// Split to enumerate.
    pub split: Split,
}

/// Names a split and carries the arguments needed to enumerate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitGenerator {
    /// Split produced by this generator.
    pub name: Split,
    /// Arguments for example generation.
    pub gen_kwargs: GenKwargs,
}

impl SplitGenerator {
    /// Creates a generator for `split` rooted at `path`.
    ///
    /// # Examples
    /// ```
    /// use hubmap_core::{Split, SplitGenerator};
    ///
    /// let generator = SplitGenerator::new(Split::Test, "/data/test");
    /// assert_eq!(generator.name, Split::Test);
    /// assert_eq!(generator.gen_kwargs.split, Split::Test);
    /// ```
    #[must_use]
    pub fn new(split: Split, path: impl Into<PathBuf>) -> Self {
        Self {
            name: split,
            gen_kwargs: GenKwargs {
                path: path.into(),
                split,
            },
        }
    }
}
