//! Error types for the HuBMAP core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by a [`crate::DownloadManager`] while acquiring a
/// remote data reference.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The reference was not of the form `owner/slug`.
    #[error("invalid data reference `{reference}`; expected `owner/slug`")]
    InvalidReference {
        /// Raw reference supplied by the builder.
        reference: String,
    },
    /// The reference has not been extracted locally and cannot be fetched.
    #[error("data reference `{reference}` is not available at `{path}`")]
    Missing {
        /// Reference that could not be resolved.
        reference: String,
        /// Location that was expected to hold the extracted data.
        path: PathBuf,
    },
    /// The remote transfer failed.
    #[error("download failed for `{url}`: {message}")]
    Transfer {
        /// URL that failed.
        url: String,
        /// Human-readable failure message.
        message: String,
    },
    /// Credentials were present but could not be loaded.
    #[error("invalid Kaggle credentials: {message}")]
    Credentials {
        /// Human-readable failure message.
        message: String,
    },
    /// A downloaded archive could not be extracted.
    #[error("invalid archive `{path}`: {message}")]
    Archive {
        /// Path of the malformed archive.
        path: PathBuf,
        /// Human-readable extraction failure.
        message: String,
    },
    /// Reading or writing cached files failed.
    #[error("I/O failure while handling cached data: {source}")]
    Io {
        /// Underlying operating system error.
        #[from]
        source: io::Error,
    },
}

define_error_codes! {
    /// Stable codes describing [`DownloadError`] variants.
    enum DownloadErrorCode for DownloadError {
        /// The reference was not of the form `owner/slug`.
        InvalidReference => InvalidReference { .. } => "DOWNLOAD_INVALID_REFERENCE",
        /// The reference has not been extracted locally.
        Missing => Missing { .. } => "DOWNLOAD_MISSING",
        /// The remote transfer failed.
        Transfer => Transfer { .. } => "DOWNLOAD_TRANSFER",
        /// Credentials could not be loaded.
        Credentials => Credentials { .. } => "DOWNLOAD_CREDENTIALS",
        /// A downloaded archive could not be extracted.
        Archive => Archive { .. } => "DOWNLOAD_ARCHIVE",
        /// Reading or writing cached files failed.
        Io => Io { .. } => "DOWNLOAD_IO",
    }
}

/// Error type produced while describing, resolving, or generating a dataset.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The requested configuration name is not registered.
    #[error("unknown configuration `{name}`; expected one of: {available}")]
    UnknownConfig {
        /// Name supplied by the caller.
        name: String,
        /// Comma-separated list of registered configuration names.
        available: String,
    },
    /// The download collaborator failed to acquire a data reference.
    #[error("failed to acquire `{reference}`: {source}")]
    Download {
        /// Reference passed to the download manager.
        reference: String,
        /// Error surfaced by the download manager, unmodified.
        #[source]
        source: DownloadError,
    },
    /// Listing a split directory failed.
    #[error("failed to list `{path}`: {source}")]
    ListDirectory {
        /// Directory that could not be listed.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// An image file could not be opened.
    #[error("failed to open image `{path}`: {source}")]
    OpenImage {
        /// Image path derived from the directory listing.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The mask paired with an image could not be opened.
    #[error("failed to open mask `{mask}` for image `{image}`: {source}")]
    OpenMask {
        /// Image whose mask was requested.
        image: PathBuf,
        /// Mask path derived from the image path.
        mask: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Reading or encoding a record payload failed.
    #[error("failed to read payload `{origin}`: {message}")]
    Payload {
        /// File path or array description the payload came from.
        origin: String,
        /// Human-readable failure message.
        message: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`DatasetError`] variants.
    enum DatasetErrorCode for DatasetError {
        /// The requested configuration name is not registered.
        UnknownConfig => UnknownConfig { .. } => "DATASET_UNKNOWN_CONFIG",
        /// The download collaborator failed to acquire a data reference.
        DownloadFailure => Download { .. } => "DATASET_DOWNLOAD_FAILURE",
        /// Listing a split directory failed.
        ListDirectory => ListDirectory { .. } => "DATASET_LIST_DIRECTORY",
        /// An image file could not be opened.
        OpenImage => OpenImage { .. } => "DATASET_OPEN_IMAGE",
        /// The mask paired with an image could not be opened.
        OpenMask => OpenMask { .. } => "DATASET_OPEN_MASK",
        /// Reading or encoding a record payload failed.
        Payload => Payload { .. } => "DATASET_PAYLOAD",
    }
}

impl DatasetError {
    /// Retrieve the inner [`DownloadErrorCode`] when the error originated in a
    /// [`crate::DownloadManager`].
    pub const fn download_code(&self) -> Option<DownloadErrorCode> {
        match self {
            Self::Download { source, .. } => Some(source.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, DatasetError>;
