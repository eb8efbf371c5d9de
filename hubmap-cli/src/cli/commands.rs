//! Command definitions and execution for the `hubmap` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hubmap_core::{
    DatasetBuilder, DatasetError, DatasetInfo, DownloadError, DownloadManager, Payload, Split,
    SplitGenerator,
};
use hubmap_dataset::{HubmapKaggle, HubmapKaggleConfig, builder_configs};
use hubmap_providers_kaggle::{
    Credentials, KaggleConfig, KaggleDownloadManager, LocalDownloadManager,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_CONFIG: &str = "256x256";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "hubmap", about = "Inspect the HuBMAP Kaggle segmentation dataset.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// List the resolution variants.
    Configs,
    /// Print the dataset metadata and record schema.
    Describe(ConfigArgs),
    /// Download or locate the split roots of a variant.
    Splits(SplitsArgs),
    /// Enumerate the records of an extracted split directory.
    Examples(ExamplesArgs),
}

/// Variant selection shared by commands.
#[derive(Debug, Args, Clone)]
pub struct ConfigArgs {
    /// Resolution variant, e.g. `512x512`.
    #[arg(long, default_value = DEFAULT_CONFIG)]
    pub config: String,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Options accepted by the `splits` command.
#[derive(Debug, Args, Clone)]
pub struct SplitsArgs {
    /// Resolution variant, e.g. `512x512`.
    #[arg(long, default_value = DEFAULT_CONFIG)]
    pub config: String,

    /// Cache directory (defaults to `HUBMAP_DATA_DIR` or the user cache).
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Resolve against already extracted archives without network access.
    #[arg(long)]
    pub offline: bool,
}

/// Options accepted by the `examples` command.
#[derive(Debug, Args, Clone)]
pub struct ExamplesArgs {
    /// Split whose layout the directory follows: `train` or `test`.
    #[arg(long)]
    pub split: Split,

    /// Extracted split root.
    #[arg(long)]
    pub path: PathBuf,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Dataset resolution or generation failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    /// Download manager configuration failed.
    #[error(transparent)]
    Download(#[from] DownloadError),
}

impl CliError {
    /// Returns the stable code of the underlying failure.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Dataset(err) => err.code().as_str(),
            Self::Download(err) => err.code().as_str(),
        }
    }
}

/// One enumerated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleSummary {
    /// Record identifier.
    pub id: String,
    /// Encoded image size in bytes.
    pub image_bytes: usize,
    /// Encoded mask size in bytes.
    pub mask_bytes: usize,
    /// Whether the mask is the generated placeholder.
    pub placeholder_mask: bool,
}

/// Result of a command, rendered by [`super::render_output`].
#[derive(Debug, Clone)]
pub enum CommandOutput {
    /// Registered variants.
    Configs(&'static [HubmapKaggleConfig]),
    /// Dataset metadata.
    Describe {
        /// Metadata of the selected variant.
        info: Box<DatasetInfo>,
        /// Render as JSON.
        json: bool,
    },
    /// Resolved split roots.
    Splits(Vec<SplitGenerator>),
    /// Enumerated records of one split.
    Examples {
        /// Enumerated split.
        split: Split,
        /// Records in listing order.
        records: Vec<ExampleSummary>,
    },
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when resolution or generation fails.
///
/// # Examples
/// ```
/// use hubmap_cli::cli::{Cli, Command, CommandOutput, run_cli};
///
/// let output = run_cli(Cli { command: Command::Configs })?;
/// let CommandOutput::Configs(configs) = output else { unreachable!() };
/// assert_eq!(configs.len(), 3);
/// # Ok::<(), hubmap_cli::cli::CliError>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<CommandOutput, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Configs => {
            span.record("command", "configs");
            Ok(CommandOutput::Configs(builder_configs()))
        }
        Command::Describe(args) => {
            span.record("command", "describe");
            run_describe(&args)
        }
        Command::Splits(args) => {
            span.record("command", "splits");
            run_splits(args)
        }
        Command::Examples(args) => {
            span.record("command", "examples");
            run_examples(args)
        }
    }
}

pub(super) fn run_describe(args: &ConfigArgs) -> Result<CommandOutput, CliError> {
    let builder = HubmapKaggle::from_config_name(&args.config)?;
    Ok(CommandOutput::Describe {
        info: Box::new(builder.describe()),
        json: args.json,
    })
}

#[instrument(
    name = "cli.splits",
    err,
    skip(args),
    fields(config = %args.config, offline = args.offline),
)]
pub(super) fn run_splits(args: SplitsArgs) -> Result<CommandOutput, CliError> {
    let builder = HubmapKaggle::from_config_name(&args.config)?;
    let mut config = KaggleConfig::default();
    if let Some(data_dir) = args.data_dir {
        config = config.with_cache_dir(data_dir);
    }

    let generators = if args.offline {
        resolve(&builder, &LocalDownloadManager::from_config(&config))?
    } else {
        if let Some(credentials) = Credentials::discover()? {
            config = config.with_credentials(credentials);
        }
        resolve(&builder, &KaggleDownloadManager::new(config))?
    };
    Ok(CommandOutput::Splits(generators))
}

fn resolve(
    builder: &HubmapKaggle,
    manager: &dyn DownloadManager,
) -> Result<Vec<SplitGenerator>, CliError> {
    Ok(builder.split_generators(manager)?)
}

#[instrument(
    name = "cli.examples",
    err,
    skip(args),
    fields(split = field::Empty, path = field::Empty),
)]
pub(super) fn run_examples(args: ExamplesArgs) -> Result<CommandOutput, CliError> {
    let split = args.split;
    let span = Span::current();
    span.record("split", field::display(split));
    span.record("path", field::display(args.path.display()));

    let builder = HubmapKaggle::default();
    let mut records = Vec::new();
    for record in builder.generate_examples(&args.path, split) {
        let (id, example) = record?;
        let placeholder_mask = matches!(example.mask, Payload::Array(_));
        records.push(ExampleSummary {
            id,
            image_bytes: example.image.into_bytes()?.len(),
            mask_bytes: example.mask.into_bytes()?.len(),
            placeholder_mask,
        });
    }
    info!(records = records.len(), "enumerated split");
    Ok(CommandOutput::Examples { split, records })
}
