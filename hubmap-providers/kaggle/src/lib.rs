//! Download managers resolving Kaggle dataset references to local paths.
//!
//! [`LocalDownloadManager`] serves archives that were already extracted;
//! [`KaggleDownloadManager`] fetches missing archives over HTTP, extracts them,
//! and caches both the archive and the extracted tree.

mod archive;
mod client;
mod config;
mod local;
mod manager;
mod reference;

pub use client::{DownloadClient, UreqDownloadClient};
pub use config::{CACHE_DIR_ENV, Credentials, DEFAULT_BASE_URL, KaggleConfig};
pub use local::LocalDownloadManager;
pub use manager::KaggleDownloadManager;
pub use reference::DatasetRef;
