//! Records yielded by example generators.
//!
//! File payloads own an open handle for the lifetime of the record; the handle
//! is closed when the payload is dropped or consumed, so consumers never need
//! to track it separately.

use std::{
    fmt,
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder};

use crate::error::{DatasetError, Result};

/// An encoded file opened for reading.
#[derive(Debug)]
pub struct FilePayload {
    path: PathBuf,
    file: File,
}

impl FilePayload {
    /// Opens `path` for reading.
    ///
    /// # Errors
    /// Returns the operating system error when the file cannot be opened, and
    /// [`io::ErrorKind::IsADirectory`] when `path` names a directory.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = File::open(&path)?;
        if file.metadata()?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("`{}` is a directory", path.display()),
            ));
        }
        Ok(Self { path, file })
    }

    /// Returns the path the payload was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the remaining bytes and closes the handle.
    ///
    /// # Errors
    /// Returns [`DatasetError::Payload`] when reading fails.
    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.file
            .read_to_end(&mut bytes)
            .map_err(|error| DatasetError::Payload {
                origin: self.path.display().to_string(),
                message: error.to_string(),
            })?;
        Ok(bytes)
    }
}

impl Read for FilePayload {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

/// A dense `height x width x channels` array of `u8` values held in memory.
///
/// # Examples
/// ```
/// use hubmap_core::ArrayPayload;
///
/// let mask = ArrayPayload::ones(4, 2, 1);
/// assert_eq!(mask.shape(), (4, 2, 1));
/// assert_eq!(mask.as_slice().len(), 8);
/// assert!(mask.as_slice().iter().all(|&value| value == 1));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ArrayPayload {
    height: u32,
    width: u32,
    channels: u8,
    data: Vec<u8>,
}

impl ArrayPayload {
    /// Creates an array with every element set to `value`.
    #[must_use]
    pub fn filled(height: u32, width: u32, channels: u8, value: u8) -> Self {
        let len = (height as usize)
            .saturating_mul(width as usize)
            .saturating_mul(usize::from(channels));
        Self {
            height,
            width,
            channels,
            data: vec![value; len],
        }
    }

    /// Creates an array of ones.
    #[must_use]
    pub fn ones(height: u32, width: u32, channels: u8) -> Self {
        Self::filled(height, width, channels, 1)
    }

    /// Returns `(height, width, channels)`.
    #[must_use]
    pub const fn shape(&self) -> (u32, u32, u8) {
        (self.height, self.width, self.channels)
    }

    /// Returns the row-major element buffer.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Encodes the array as a PNG image.
    ///
    /// # Errors
    /// Returns [`DatasetError::Payload`] when the channel count has no PNG
    /// colour type or the encoder fails.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let color = match self.channels {
            1 => ExtendedColorType::L8,
            3 => ExtendedColorType::Rgb8,
            other => {
                return Err(DatasetError::Payload {
                    origin: self.describe(),
                    message: format!("cannot encode {other} channels as PNG"),
                });
            }
        };
        let mut encoded = Vec::new();
        PngEncoder::new(&mut encoded)
            .write_image(&self.data, self.width, self.height, color)
            .map_err(|error| DatasetError::Payload {
                origin: self.describe(),
                message: error.to_string(),
            })?;
        Ok(encoded)
    }

    fn describe(&self) -> String {
        format!("array {}x{}x{}", self.height, self.width, self.channels)
    }
}

impl fmt::Debug for ArrayPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayPayload")
            .field("height", &self.height)
            .field("width", &self.width)
            .field("channels", &self.channels)
            .finish_non_exhaustive()
    }
}

/// Binary content of an image-typed feature.
#[derive(Debug)]
pub enum Payload {
    /// Encoded bytes streamed from a file.
    File(FilePayload),
    /// Raw pixel values generated in memory.
    Array(ArrayPayload),
}

impl Payload {
    /// Returns the backing file when the payload streams from disk.
    #[must_use]
    pub const fn as_file(&self) -> Option<&FilePayload> {
        match self {
            Self::File(file) => Some(file),
            Self::Array(_) => None,
        }
    }

    /// Returns the in-memory array when the payload was generated.
    #[must_use]
    pub const fn as_array(&self) -> Option<&ArrayPayload> {
        match self {
            Self::File(_) => None,
            Self::Array(array) => Some(array),
        }
    }

    /// Produces encoded image bytes, reading files to completion and encoding
    /// arrays as PNG.
    ///
    /// # Errors
    /// Returns [`DatasetError::Payload`] when reading or encoding fails.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Self::File(file) => file.into_bytes(),
            Self::Array(array) => array.encode_png(),
        }
    }
}

/// One dataset record.
#[derive(Debug)]
pub struct Example {
    /// Identifier, unique within a split.
    pub id: String,
    /// Encoded three-channel image.
    pub image: FilePayload,
    /// Encoded single-channel mask or a generated placeholder.
    pub mask: Payload,
}
