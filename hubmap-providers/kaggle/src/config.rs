//! Cache location, endpoint, and credential discovery for Kaggle downloads.

use std::{
    env,
    ffi::OsString,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hubmap_core::DownloadError;
use serde::Deserialize;

/// Environment variable overriding the cache directory.
pub const CACHE_DIR_ENV: &str = "HUBMAP_DATA_DIR";
/// Default Kaggle API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.kaggle.com/api/v1";

const USERNAME_ENV: &str = "KAGGLE_USERNAME";
const KEY_ENV: &str = "KAGGLE_KEY";
const CONFIG_DIR_ENV: &str = "KAGGLE_CONFIG_DIR";
const CREDENTIALS_FILE: &str = "kaggle.json";

/// Kaggle API credentials.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    /// Kaggle user name.
    pub username: String,
    /// Kaggle API key.
    pub key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Creates credentials from a user name and API key.
    #[must_use]
    pub fn new(username: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            key: key.into(),
        }
    }

    /// Reads a `kaggle.json` file.
    ///
    /// # Errors
    /// Returns [`DownloadError::Io`] when the file cannot be read and
    /// [`DownloadError::Credentials`] when it is not valid JSON credentials.
    pub fn from_json_file(path: &Path) -> Result<Self, DownloadError> {
        let raw = fs::read(path)?;
        serde_json::from_slice(&raw).map_err(|error| DownloadError::Credentials {
            message: format!("{}: {error}", path.display()),
        })
    }

    /// Discovers credentials from `KAGGLE_USERNAME`/`KAGGLE_KEY`, falling back
    /// to `kaggle.json` in `KAGGLE_CONFIG_DIR` or `~/.kaggle`.
    ///
    /// # Errors
    /// Returns [`DownloadError`] when a credentials file exists but cannot be
    /// read or parsed.
    pub fn discover() -> Result<Option<Self>, DownloadError> {
        credentials_from(|name| env::var_os(name))
    }

    /// Returns the HTTP basic `Authorization` header value.
    ///
    /// # Examples
    /// ```
    /// use hubmap_providers_kaggle::Credentials;
    ///
    /// let credentials = Credentials::new("user", "key");
    /// assert_eq!(credentials.authorization_header(), "Basic dXNlcjprZXk=");
    /// ```
    #[must_use]
    pub fn authorization_header(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.key));
        format!("Basic {token}")
    }
}

fn credentials_from(
    lookup: impl Fn(&str) -> Option<OsString>,
) -> Result<Option<Credentials>, DownloadError> {
    let text = |name: &str| lookup(name).and_then(|value| value.into_string().ok());
    if let (Some(username), Some(key)) = (text(USERNAME_ENV), text(KEY_ENV)) {
        return Ok(Some(Credentials::new(username, key)));
    }

    let config_dir = lookup(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| lookup("HOME").map(|home| PathBuf::from(home).join(".kaggle")));
    let Some(path) = config_dir.map(|dir| dir.join(CREDENTIALS_FILE)) else {
        return Ok(None);
    };
    match Credentials::from_json_file(&path) {
        Ok(credentials) => Ok(Some(credentials)),
        Err(DownloadError::Io { source }) if source.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error),
    }
}

/// Configuration for Kaggle download and cache behaviour.
#[derive(Clone, Debug)]
pub struct KaggleConfig {
    /// Directory holding downloaded archives and extracted trees.
    pub cache_dir: PathBuf,
    /// Kaggle API endpoint.
    pub base_url: String,
    /// Credentials sent with download requests.
    pub credentials: Option<Credentials>,
}

impl Default for KaggleConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            credentials: None,
        }
    }
}

impl KaggleConfig {
    /// Builds the default configuration with discovered credentials.
    ///
    /// # Errors
    /// Returns [`DownloadError`] when a credentials file is malformed.
    pub fn from_env() -> Result<Self, DownloadError> {
        Ok(Self {
            credentials: Credentials::discover()?,
            ..Self::default()
        })
    }

    /// Overrides the cache directory.
    #[must_use]
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    /// Overrides the API endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Directory holding downloaded `.zip` archives.
    #[must_use]
    pub fn archives_dir(&self) -> PathBuf {
        self.cache_dir.join("archives")
    }

    /// Directory holding extracted trees, laid out as `<owner>/<slug>`.
    #[must_use]
    pub fn extracted_dir(&self) -> PathBuf {
        self.cache_dir.join("extracted")
    }
}

fn default_cache_dir() -> PathBuf {
    cache_dir_from(|name| env::var_os(name))
}

fn cache_dir_from(lookup: impl Fn(&str) -> Option<OsString>) -> PathBuf {
    if let Some(explicit) = lookup(CACHE_DIR_ENV) {
        return PathBuf::from(explicit);
    }

    if let Some(xdg_cache) = lookup("XDG_CACHE_HOME") {
        return PathBuf::from(xdg_cache).join("hubmap");
    }

    if let Some(home) = lookup("HOME") {
        return PathBuf::from(home).join(".cache").join("hubmap");
    }

    env::temp_dir().join("hubmap")
}
