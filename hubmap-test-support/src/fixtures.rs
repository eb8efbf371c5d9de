//! On-disk dataset trees for generator and provider tests.
//!
//! Files hold recognisable placeholder bytes rather than real PNG data; the
//! generator never decodes images, so tests only need to match streams back to
//! the file they came from.

use std::io;
use std::path::{Path, PathBuf};

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tempfile::TempDir;

/// Bytes written for the image called `name`.
#[must_use]
pub fn image_bytes(name: &str) -> Vec<u8> {
    format!("image:{name}").into_bytes()
}

/// Bytes written for the mask paired with the image called `name`.
#[must_use]
pub fn mask_bytes(name: &str) -> Vec<u8> {
    format!("mask:{name}").into_bytes()
}

/// A temporary extracted-archive root.
///
/// # Examples
/// ```
/// use hubmap_test_support::fixtures::DatasetTree;
///
/// let tree = DatasetTree::new()?
///     .with_train_pair("a.png")?
///     .with_test_image("x.png")?;
/// assert!(tree.path().join("train/a.png").is_file());
/// assert!(tree.path().join("masks/a.png").is_file());
/// assert!(tree.path().join("x.png").is_file());
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct DatasetTree {
    _dir: TempDir,
    root: Dir,
    path: PathBuf,
}

impl DatasetTree {
    /// Creates an empty tree rooted at a fresh temporary directory.
    ///
    /// # Errors
    /// Returns any I/O error raised while creating the directory.
    pub fn new() -> io::Result<Self> {
        let dir = TempDir::new()?;
        let root = Dir::open_ambient_dir(dir.path(), ambient_authority())?;
        let path = dir.path().to_path_buf();
        Ok(Self {
            _dir: dir,
            root,
            path,
        })
    }

    /// Creates an empty tree rooted at `nested` inside a fresh temporary
    /// directory, so the root path contains a chosen component.
    ///
    /// # Errors
    /// Returns any I/O error raised while creating the directories.
    pub fn nested(nested: &str) -> io::Result<Self> {
        let dir = TempDir::new()?;
        let parent = Dir::open_ambient_dir(dir.path(), ambient_authority())?;
        parent.create_dir_all(nested)?;
        let root = parent.open_dir(nested)?;
        let path = dir.path().join(nested);
        Ok(Self {
            _dir: dir,
            root,
            path,
        })
    }

    /// Returns the root path of the tree.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `train/<name>` and `masks/<name>`.
    ///
    /// # Errors
    /// Returns any I/O error raised while writing.
    pub fn with_train_pair(self, name: &str) -> io::Result<Self> {
        self.with_train_image(name)?.with_mask(name)
    }

    /// Writes `train/<name>` without a mask.
    ///
    /// # Errors
    /// Returns any I/O error raised while writing.
    pub fn with_train_image(self, name: &str) -> io::Result<Self> {
        self.with_file(&format!("train/{name}"), &image_bytes(name))
    }

    /// Writes `masks/<name>` without an image.
    ///
    /// # Errors
    /// Returns any I/O error raised while writing.
    pub fn with_mask(self, name: &str) -> io::Result<Self> {
        self.with_file(&format!("masks/{name}"), &mask_bytes(name))
    }

    /// Writes `<name>` at the root, as laid out by the test archive.
    ///
    /// # Errors
    /// Returns any I/O error raised while writing.
    pub fn with_test_image(self, name: &str) -> io::Result<Self> {
        self.with_file(name, &image_bytes(name))
    }

    /// Writes arbitrary `contents` at `relative`, creating parent directories.
    ///
    /// # Errors
    /// Returns any I/O error raised while writing.
    pub fn with_file(self, relative: &str, contents: &[u8]) -> io::Result<Self> {
        if let Some(parent) = Path::new(relative).parent()
            && !parent.as_os_str().is_empty()
        {
            self.root.create_dir_all(parent)?;
        }
        self.root.write(relative, contents)?;
        Ok(self)
    }

    /// Creates an empty directory at `relative`.
    ///
    /// # Errors
    /// Returns any I/O error raised while creating the directory.
    pub fn with_dir(self, relative: &str) -> io::Result<Self> {
        self.root.create_dir_all(relative)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    #[rstest]
    fn train_pairs_write_matching_image_and_mask() -> io::Result<()> {
        let tree = DatasetTree::new()?.with_train_pair("a.png")?;
        assert_eq!(fs::read(tree.path().join("train/a.png"))?, image_bytes("a.png"));
        assert_eq!(fs::read(tree.path().join("masks/a.png"))?, mask_bytes("a.png"));
        Ok(())
    }

    #[rstest]
    fn nested_roots_include_the_component() -> io::Result<()> {
        let tree = DatasetTree::nested("training-data")?.with_test_image("x.png")?;
        assert!(tree.path().ends_with("training-data"));
        assert!(tree.path().join("x.png").is_file());
        Ok(())
    }
}
