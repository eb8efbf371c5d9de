//! Command-line interface for inspecting the HuBMAP Kaggle dataset.
//!
//! Commands list the resolution variants, describe the record schema,
//! resolve split roots through a download manager, and enumerate examples
//! from an extracted split directory.

mod commands;
mod render;

pub use commands::{
    Cli, CliError, Command, CommandOutput, ConfigArgs, ExampleSummary, ExamplesArgs, SplitsArgs,
    run_cli,
};
pub use render::render_output;

#[cfg(test)]
mod tests;
