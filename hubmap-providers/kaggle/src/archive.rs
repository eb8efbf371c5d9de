//! Atomic archive writes and zip extraction.

use std::{
    ffi::OsString,
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use hubmap_core::DownloadError;
use zip::ZipArchive;

fn part_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}

/// Writes `path` through a sibling `.part` file that is renamed on success.
///
/// The partial file is removed if `fill` fails, so an interrupted download
/// never leaves a truncated archive at `path`.
pub(crate) fn write_atomic_with<F>(path: &Path, fill: F) -> Result<u64, DownloadError>
where
    F: FnOnce(&mut dyn Write) -> Result<u64, DownloadError>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let part = part_path(path);
    let result = File::create(&part)
        .map_err(DownloadError::from)
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            let written = fill(&mut writer)?;
            writer.flush()?;
            Ok(written)
        });
    match result {
        Ok(written) => {
            fs::rename(&part, path)?;
            Ok(written)
        }
        Err(error) => {
            let _ = fs::remove_file(&part);
            Err(error)
        }
    }
}

/// Extracts `archive` into `destination` via a `.part` staging directory.
pub(crate) fn extract_zip(archive: &Path, destination: &Path) -> Result<(), DownloadError> {
    let failure = |message: String| DownloadError::Archive {
        path: archive.to_path_buf(),
        message,
    };

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    let staging = part_path(destination);
    if staging.exists() {
        fs::remove_dir_all(&staging)?;
    }

    let reader = BufReader::new(File::open(archive)?);
    let mut zip = ZipArchive::new(reader).map_err(|error| failure(error.to_string()))?;
    if let Err(error) = zip.extract(&staging) {
        let _ = fs::remove_dir_all(&staging);
        return Err(failure(error.to_string()));
    }
    fs::rename(&staging, destination)?;
    Ok(())
}
