//! HTTP transport used to fetch dataset archives.

use std::io::{self, Write};

use hubmap_core::DownloadError;

use crate::config::Credentials;

/// Transport abstraction for archive downloads.
pub trait DownloadClient {
    /// Streams the body at `url` into `destination`, returning the byte count.
    ///
    /// # Errors
    /// Returns [`DownloadError::Transfer`] if the request or the body copy
    /// fails.
    fn download(
        &self,
        url: &str,
        credentials: Option<&Credentials>,
        destination: &mut dyn Write,
    ) -> Result<u64, DownloadError>;
}

/// [`DownloadClient`] backed by a blocking `ureq` agent.
#[derive(Clone, Copy, Debug, Default)]
pub struct UreqDownloadClient;

impl DownloadClient for UreqDownloadClient {
    fn download(
        &self,
        url: &str,
        credentials: Option<&Credentials>,
        destination: &mut dyn Write,
    ) -> Result<u64, DownloadError> {
        let transfer = |message: String| DownloadError::Transfer {
            url: url.to_owned(),
            message,
        };

        let mut request = ureq::get(url);
        if let Some(credentials) = credentials {
            request = request.header("Authorization", credentials.authorization_header());
        }
        let response = request.call().map_err(|error| transfer(error.to_string()))?;

        let mut reader = response.into_body().into_reader();
        io::copy(&mut reader, destination).map_err(|error| transfer(error.to_string()))
    }
}
