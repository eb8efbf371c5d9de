//! Lazy enumeration of image/mask records from an extracted split root.
//!
//! Training roots hold `train/*.png` images with masks under a sibling
//! `masks/` directory; test roots hold `*.png` images directly and carry no
//! masks, so every test record gets a constant placeholder.

use std::{
    ffi::{OsStr, OsString},
    fs,
    io,
    iter::FusedIterator,
    path::{MAIN_SEPARATOR, Path, PathBuf},
    vec,
};

use hubmap_core::{ArrayPayload, DatasetError, Example, FilePayload, Payload, Result, Split};
use tracing::{Span, debug, field, info_span, warn};

/// Edge length of the placeholder mask attached to test records.
pub const PLACEHOLDER_MASK_SIZE: u32 = 256;
/// Channel count of the placeholder mask attached to test records.
pub const PLACEHOLDER_MASK_CHANNELS: u8 = 1;

const TRAIN_DIR: &str = "train";
const MASK_DIR: &str = "masks";
const IMAGE_SUFFIX: &str = ".png";

/// Derives the mask path for a training image by replacing the first
/// occurrence of `train` anywhere in the path with `masks`.
///
/// The substitution is textual: a root such as `/data/training/` will be
/// rewritten instead of the `train/` directory component.
///
/// # Examples
/// ```
/// use std::path::{Path, PathBuf};
/// use hubmap_dataset::mask_path_for;
///
/// assert_eq!(
///     mask_path_for(Path::new("/data/train/a.png")),
///     PathBuf::from("/data/masks/a.png"),
/// );
/// ```
#[must_use]
pub fn mask_path_for(image: &Path) -> PathBuf {
    let encoded = image.as_os_str().as_encoded_bytes();
    let needle = TRAIN_DIR.as_bytes();
    let Some(at) = encoded
        .windows(needle.len())
        .position(|window| window == needle)
    else {
        return image.to_path_buf();
    };
    let (head, rest) = encoded.split_at(at);
    let tail = rest.get(needle.len()..).unwrap_or_default();

    let mut rewritten = Vec::with_capacity(encoded.len());
    rewritten.extend_from_slice(head);
    rewritten.extend_from_slice(MASK_DIR.as_bytes());
    rewritten.extend_from_slice(tail);
    // SAFETY: `head` and `tail` are split from a valid encoded `OsStr` at the
    // boundaries of an ASCII substring, and the inserted bytes are ASCII.
    let rewritten = unsafe { OsString::from_encoded_bytes_unchecked(rewritten) };
    PathBuf::from(rewritten)
}

/// Derives the record identifier from an image path: the base name, split
/// on the path separator, first segment. The base name never contains a
/// separator, so the identifier is the file name including its extension.
/// The identifier is a text feature: bytes that are not UTF-8 are replaced
/// with U+FFFD. File access always goes through the original path.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use hubmap_dataset::example_id;
///
/// assert_eq!(example_id(Path::new("/data/train/a.png")), "a.png");
/// ```
#[must_use]
pub fn example_id(image: &Path) -> String {
    let basename = image
        .file_name()
        .map(OsStr::to_string_lossy)
        .unwrap_or_default();
    basename
        .split(MAIN_SEPARATOR)
        .next()
        .unwrap_or_default()
        .to_owned()
}

enum State {
    Pending,
    Listed(vec::IntoIter<PathBuf>),
    Finished,
}

/// Single-pass iterator over the `(id, example)` pairs of one split.
///
/// The directory is listed on the first call to [`Iterator::next`]. Files are
/// opened as each record is produced. The first failure is yielded as an
/// `Err` item and ends the iteration.
pub struct Examples {
    root: PathBuf,
    split: Split,
    state: State,
    emitted: usize,
    span: Span,
}

impl Examples {
    /// Creates an iterator for `split` rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, split: Split) -> Self {
        let root = root.into();
        let span = info_span!(
            "dataset.generate_examples",
            split = %split,
            path = %root.display(),
            records = field::Empty,
        );
        Self {
            root,
            split,
            state: State::Pending,
            emitted: 0,
            span,
        }
    }

    /// Returns the split root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the split being enumerated.
    #[must_use]
    pub const fn split(&self) -> Split {
        self.split
    }

    fn image_dir(&self) -> PathBuf {
        match self.split {
            Split::Train => self.root.join(TRAIN_DIR),
            Split::Test => self.root.clone(),
        }
    }

    fn example_for(&self, image_path: PathBuf) -> Result<(String, Example)> {
        let image = FilePayload::open(&image_path).map_err(|source| DatasetError::OpenImage {
            path: image_path.clone(),
            source,
        })?;
        let mask = match self.split {
            Split::Train => {
                let mask_path = mask_path_for(&image_path);
                let file = FilePayload::open(&mask_path).map_err(|source| {
                    DatasetError::OpenMask {
                        image: image_path.clone(),
                        mask: mask_path,
                        source,
                    }
                })?;
                Payload::File(file)
            }
            Split::Test => Payload::Array(ArrayPayload::ones(
                PLACEHOLDER_MASK_SIZE,
                PLACEHOLDER_MASK_SIZE,
                PLACEHOLDER_MASK_CHANNELS,
            )),
        };
        let id = example_id(&image_path);
        Ok((
            id.clone(),
            Example {
                id,
                image,
                mask,
            },
        ))
    }

    fn finish(&mut self) {
        self.state = State::Finished;
        self.span.record("records", self.emitted);
    }
}

impl Iterator for Examples {
    type Item = Result<(String, Example)>;

    fn next(&mut self) -> Option<Self::Item> {
        let span = self.span.clone();
        let _entered = span.enter();

        if matches!(self.state, State::Pending) {
            let dir = self.image_dir();
            match list_images(&dir) {
                Ok(images) => {
                    debug!(images = images.len(), dir = %dir.display(), "listed split images");
                    self.state = State::Listed(images.into_iter());
                }
                Err(error) => {
                    self.finish();
                    return Some(Err(error));
                }
            }
        }

        let State::Listed(images) = &mut self.state else {
            return None;
        };
        let Some(image_path) = images.next() else {
            self.finish();
            return None;
        };

        match self.example_for(image_path) {
            Ok((key, example)) => {
                self.emitted += 1;
                debug!(id = %key, "generated example");
                Some(Ok((key, example)))
            }
            Err(error) => {
                self.finish();
                Some(Err(error))
            }
        }
    }
}

impl FusedIterator for Examples {}

/// Lists `<dir>/*.png` in directory order. Hidden names are skipped; a
/// missing directory lists as empty.
fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let list_error = |source: io::Error| DatasetError::ListDirectory {
        path: dir.to_path_buf(),
        source,
    };
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            warn!(dir = %dir.display(), "split directory does not exist, listing no images");
            return Ok(Vec::new());
        }
        Err(error) => return Err(list_error(error)),
    };

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry.map_err(list_error)?;
        // Names only, like a shell glob: directories and dangling links that
        // match are kept so that opening them fails the split.
        if matches_image_glob(&entry.file_name()) {
            images.push(entry.path());
        }
    }
    Ok(images)
}

fn matches_image_glob(name: &OsStr) -> bool {
    let name = name.as_encoded_bytes();
    !name.starts_with(b".") && name.ends_with(IMAGE_SUFFIX.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a.png", true)]
    #[case("tile_0001.png", true)]
    #[case(".hidden.png", false)]
    #[case(".png", false)]
    #[case("a.PNG", false)]
    #[case("a.png.bak", false)]
    #[case("a.jpg", false)]
    fn image_glob_matches_visible_png_names(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(matches_image_glob(OsStr::new(name)), expected);
    }

    #[rstest]
    #[case("/data/train/a.png", "/data/masks/a.png")]
    #[case("/data/training/train/a.png", "/data/masksing/train/a.png")]
    #[case("/data/train/train_01.png", "/data/masks/train_01.png")]
    #[case("/data/test/a.png", "/data/test/a.png")]
    fn mask_path_replaces_first_occurrence_only(#[case] image: &str, #[case] expected: &str) {
        assert_eq!(mask_path_for(Path::new(image)), PathBuf::from(expected));
    }

    #[cfg(unix)]
    #[test]
    fn mask_path_preserves_non_utf8_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let image = Path::new(OsStr::from_bytes(b"/data/train/\xffimg.png"));
        let expected = Path::new(OsStr::from_bytes(b"/data/masks/\xffimg.png"));
        assert_eq!(mask_path_for(image), expected);
    }

    #[rstest]
    #[case("/data/train/a.png", "a.png")]
    #[case("relative/b.png", "b.png")]
    #[case("c.png", "c.png")]
    #[case("/", "")]
    fn example_id_is_the_base_name(#[case] image: &str, #[case] expected: &str) {
        assert_eq!(example_id(Path::new(image)), expected);
    }
}
