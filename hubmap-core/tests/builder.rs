//! Tests for the provided methods of [`DatasetBuilder`].

mod common;

use std::fs;

use common::{Dummy, FailingManager, FixedManager};
use hubmap_core::{DatasetBuilder, DatasetError, DownloadErrorCode, Split};
use rstest::rstest;
use tempfile::TempDir;

#[rstest]
fn splits_pairs_each_generator_with_its_examples() {
    let dir = TempDir::new().expect("temp dir must be created");
    fs::write(dir.path().join("train.png"), b"train").expect("fixture must be written");
    fs::write(dir.path().join("test.png"), b"test").expect("fixture must be written");

    let splits = Dummy
        .splits(&FixedManager(dir.path().to_path_buf()))
        .expect("splits must resolve");
    let names: Vec<Split> = splits.iter().map(|(split, _)| *split).collect();
    assert_eq!(names, vec![Split::Train, Split::Test]);

    for (split, examples) in splits {
        let records: Vec<_> = examples
            .collect::<Result<_, _>>()
            .expect("examples must open");
        assert_eq!(records.len(), 1);
        let (key, example) = records.into_iter().next().expect("one record");
        assert_eq!(key, split.as_str());
        let bytes = example.image.into_bytes().expect("image must read");
        assert_eq!(bytes, split.as_str().as_bytes());
    }
}

#[rstest]
fn splits_propagates_download_failures() {
    let err = Dummy
        .splits(&FailingManager)
        .expect_err("failing manager must abort resolution");
    assert!(matches!(err, DatasetError::Download { .. }));
    assert_eq!(err.download_code(), Some(DownloadErrorCode::Missing));
}

#[rstest]
fn config_accessors_expose_static_descriptor() {
    let config = Dummy.config();
    assert_eq!(config.name(), "tiny");
    assert_eq!(config.description(), "Tiny demo");
    assert_eq!(Dummy.info().full_name(), "dummy/tiny:0.1.0");
}
