//! Unit tests for CLI parsing, command execution, and rendering.

use super::commands::{run_examples, run_splits};
use super::{
    Cli, CliError, Command, CommandOutput, ConfigArgs, ExampleSummary, ExamplesArgs, SplitsArgs,
    render_output, run_cli,
};

use std::path::PathBuf;

use clap::Parser;
use hubmap_core::{DatasetError, DownloadErrorCode, Split};
use hubmap_dataset::TEST_DATA_REF;
use hubmap_test_support::fixtures::{DatasetTree, image_bytes, mask_bytes};
use hubmap_test_support::tracing::RecordingLayer;
use rstest::rstest;
use tracing_subscriber::layer::SubscriberExt;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn render(output: &CommandOutput) -> Result<String, Box<dyn std::error::Error>> {
    let mut buffer = Vec::new();
    render_output(output, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn extracted_tree(train_ref: &str) -> std::io::Result<DatasetTree> {
    DatasetTree::new()?
        .with_dir(&format!("extracted/{train_ref}/train"))?
        .with_dir(&format!("extracted/{TEST_DATA_REF}"))
}

#[rstest]
fn parses_splits_arguments() {
    let cli = Cli::try_parse_from([
        "hubmap",
        "splits",
        "--config",
        "512x512",
        "--data-dir",
        "/data",
        "--offline",
    ])
    .expect("arguments must parse");
    let Command::Splits(args) = cli.command else {
        panic!("expected splits command");
    };
    assert_eq!(args.config, "512x512");
    assert_eq!(args.data_dir, Some(PathBuf::from("/data")));
    assert!(args.offline);
}

#[rstest]
#[case("train", Split::Train)]
#[case("test", Split::Test)]
fn parses_examples_split(#[case] raw: &str, #[case] expected: Split) {
    let cli = Cli::try_parse_from(["hubmap", "examples", "--split", raw, "--path", "/x"])
        .expect("arguments must parse");
    let Command::Examples(args) = cli.command else {
        panic!("expected examples command");
    };
    assert_eq!(args.split, expected);
    assert_eq!(args.path, PathBuf::from("/x"));
}

#[rstest]
fn rejects_unknown_split_names() {
    let err = Cli::try_parse_from(["hubmap", "examples", "--split", "val", "--path", "/x"])
        .expect_err("unknown split must be rejected");
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    assert!(err.to_string().contains("unknown split `val`"));
}

#[rstest]
fn configs_lists_every_variant() -> TestResult {
    let output = run_cli(Cli {
        command: Command::Configs,
    })?;
    let text = render(&output)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "256x256\t256\tTraining images cropped to 256x256",
            "512x512\t512\tTraining images cropped to 512x512",
            "1024x1024\t1024\tTraining images cropped to 1024x1024",
        ]
    );
    Ok(())
}

#[rstest]
fn describe_renders_schema_as_text() -> TestResult {
    let output = run_cli(Cli {
        command: Command::Describe(ConfigArgs {
            config: "1024x1024".into(),
            json: false,
        }),
    })?;
    let text = render(&output)?;
    assert!(text.contains("dataset: hubmap_kaggle/1024x1024:1.0.0"));
    assert!(text.contains("  image: image, 3 channel(s), png"));
    assert!(text.contains("  mask: image, 1 channel(s), png"));
    assert!(text.contains("  id: text"));
    assert!(text.contains("supervised: image -> mask"));
    Ok(())
}

#[rstest]
fn describe_renders_schema_as_json() -> TestResult {
    let output = run_cli(Cli {
        command: Command::Describe(ConfigArgs {
            config: "512x512".into(),
            json: true,
        }),
    })?;
    let value: serde_json::Value = serde_json::from_str(&render(&output)?)?;
    assert_eq!(value["name"], "hubmap_kaggle");
    assert_eq!(value["config_name"], "512x512");
    assert_eq!(value["version"], "1.0.0");
    assert_eq!(value["features"]["image"]["shape"]["channels"], 3);
    assert_eq!(value["features"]["mask"]["shape"]["channels"], 1);
    assert_eq!(value["features"]["mask"]["encoding"], "png");
    assert_eq!(value["features"]["id"]["type"], "text");
    Ok(())
}

#[rstest]
fn describe_rejects_unknown_config() {
    let err = run_cli(Cli {
        command: Command::Describe(ConfigArgs {
            config: "128x128".into(),
            json: false,
        }),
    })
    .expect_err("unknown config must fail");
    assert_eq!(err.code(), "DATASET_UNKNOWN_CONFIG");
    assert!(matches!(
        err,
        CliError::Dataset(DatasetError::UnknownConfig { .. })
    ));
}

#[rstest]
fn offline_splits_resolve_extracted_roots() -> TestResult {
    let tree = extracted_tree("iafoss/hubmap-512x512")?;
    let output = run_splits(SplitsArgs {
        config: "512x512".into(),
        data_dir: Some(tree.path().to_path_buf()),
        offline: true,
    })?;

    let CommandOutput::Splits(generators) = &output else {
        panic!("expected splits output");
    };
    let extracted = tree.path().join("extracted");
    let roots: Vec<(Split, PathBuf)> = generators
        .iter()
        .map(|generator| (generator.name, generator.gen_kwargs.path.clone()))
        .collect();
    assert_eq!(
        roots,
        [
            (Split::Train, extracted.join("iafoss/hubmap-512x512")),
            (Split::Test, extracted.join(TEST_DATA_REF)),
        ]
    );
    assert!(render(&output)?.starts_with("train\t"));
    Ok(())
}

#[rstest]
fn offline_splits_report_missing_archives() -> TestResult {
    let tree = extracted_tree("iafoss/hubmap-256x256")?;
    let err = run_splits(SplitsArgs {
        config: "1024x1024".into(),
        data_dir: Some(tree.path().to_path_buf()),
        offline: true,
    })
    .expect_err("unextracted variant must fail");

    let CliError::Dataset(dataset) = &err else {
        panic!("expected dataset error");
    };
    assert_eq!(dataset.download_code(), Some(DownloadErrorCode::Missing));
    assert_eq!(err.code(), "DATASET_DOWNLOAD_FAILURE");
    Ok(())
}

#[rstest]
fn examples_summarise_train_records() -> TestResult {
    let tree = DatasetTree::new()?
        .with_train_pair("a.png")?
        .with_train_pair("b.png")?;
    let output = run_examples(ExamplesArgs {
        split: Split::Train,
        path: tree.path().to_path_buf(),
    })?;

    let CommandOutput::Examples { split, records } = &output else {
        panic!("expected examples output");
    };
    assert_eq!(*split, Split::Train);
    let mut sorted = records.clone();
    sorted.sort_by(|left, right| left.id.cmp(&right.id));
    let expected: Vec<ExampleSummary> = ["a.png", "b.png"]
        .into_iter()
        .map(|id| ExampleSummary {
            id: id.to_owned(),
            image_bytes: image_bytes(id).len(),
            mask_bytes: mask_bytes(id).len(),
            placeholder_mask: false,
        })
        .collect();
    assert_eq!(sorted, expected);
    assert!(render(&output)?.ends_with("train: 2 records\n"));
    Ok(())
}

#[rstest]
fn examples_mark_placeholder_test_masks() -> TestResult {
    let tree = DatasetTree::new()?.with_test_image("x.png")?;
    let output = run_examples(ExamplesArgs {
        split: Split::Test,
        path: tree.path().to_path_buf(),
    })?;

    let CommandOutput::Examples { records, .. } = &output else {
        panic!("expected examples output");
    };
    let [record] = records.as_slice() else {
        panic!("expected exactly one record");
    };
    assert_eq!(record.id, "x.png");
    assert!(record.placeholder_mask);
    assert!(record.mask_bytes > 0);
    assert!(render(&output)?.contains("x.png\t"));
    Ok(())
}

#[rstest]
fn examples_abort_on_missing_mask() -> TestResult {
    let tree = DatasetTree::new()?.with_train_image("lonely.png")?;
    let err = run_examples(ExamplesArgs {
        split: Split::Train,
        path: tree.path().to_path_buf(),
    })
    .expect_err("missing mask must fail");
    assert_eq!(err.code(), "DATASET_OPEN_MASK");
    Ok(())
}

#[rstest]
fn run_cli_records_command_span() -> TestResult {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || {
        run_cli(Cli {
            command: Command::Configs,
        })
    })?;

    let span = layer.span("cli.run").expect("cli span must exist");
    assert_eq!(span.fields.get("command"), Some(&"configs".to_owned()));
    Ok(())
}
