//! HuBMAP core library.
//!
//! Catalog abstractions shared by dataset adapters: builder configuration,
//! feature schemas, split descriptors, lazily opened example payloads, and
//! the download-manager seam used to acquire raw archives.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod download;
mod error;
mod example;
mod features;
mod info;
mod split;
mod version;

pub use crate::{
    builder::{BuilderConfig, DatasetBuilder},
    download::DownloadManager,
    error::{DatasetError, DatasetErrorCode, DownloadError, DownloadErrorCode, Result},
    example::{ArrayPayload, Example, FilePayload, Payload},
    features::{Feature, FeaturesDict, ImageEncoding, ImageShape},
    info::{DatasetInfo, SupervisedKeys},
    split::{GenKwargs, ParseSplitError, Split, SplitGenerator},
    version::Version,
};
