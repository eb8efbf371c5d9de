//! Text and JSON rendering of command results.

use std::io::{self, Write};

use hubmap_core::{DatasetInfo, Feature};

use super::commands::{CommandOutput, ExampleSummary};

/// Renders `output` to `writer`.
///
/// Tabular results are written as tab-separated lines; `describe --json`
/// writes pretty-printed JSON.
///
/// # Errors
/// Returns [`io::Error`] if writing or serialisation fails.
///
/// # Examples
/// ```
/// use hubmap_cli::cli::{CommandOutput, render_output};
///
/// let mut buffer = Vec::new();
/// render_output(&CommandOutput::Configs(hubmap_dataset::builder_configs()), &mut buffer)?;
/// let text = String::from_utf8(buffer).expect("utf-8 output");
/// assert!(text.starts_with("256x256\t256\t"));
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn render_output(output: &CommandOutput, mut writer: impl Write) -> io::Result<()> {
    match output {
        CommandOutput::Configs(configs) => {
            for config in *configs {
                writeln!(
                    writer,
                    "{}\t{}\t{}",
                    config.name(),
                    config.size(),
                    config.builder_config().description()
                )?;
            }
            Ok(())
        }
        CommandOutput::Describe { info, json: true } => {
            serde_json::to_writer_pretty(&mut writer, info.as_ref())?;
            writeln!(writer)
        }
        CommandOutput::Describe { info, json: false } => render_info(info, writer),
        CommandOutput::Splits(generators) => {
            for generator in generators {
                writeln!(
                    writer,
                    "{}\t{}",
                    generator.name,
                    generator.gen_kwargs.path.display()
                )?;
            }
            Ok(())
        }
        CommandOutput::Examples { split, records } => {
            for record in records {
                render_example(record, &mut writer)?;
            }
            writeln!(writer, "{split}: {} records", records.len())
        }
    }
}

fn render_info(info: &DatasetInfo, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "dataset: {}", info.full_name())?;
    writeln!(writer, "config: {}", info.config_description)?;
    writeln!(writer, "homepage: {}", info.homepage)?;
    writeln!(writer, "features:")?;
    for (name, feature) in info.features.iter() {
        match feature {
            Feature::Image { shape, encoding } => writeln!(
                writer,
                "  {name}: image, {} channel(s), {}",
                shape.channels,
                encoding.as_str()
            )?,
            Feature::Text => writeln!(writer, "  {name}: text")?,
        }
    }
    if let Some(keys) = &info.supervised_keys {
        writeln!(writer, "supervised: {} -> {}", keys.input, keys.target)?;
    }
    Ok(())
}

fn render_example(record: &ExampleSummary, mut writer: impl Write) -> io::Result<()> {
    let mask_kind = if record.placeholder_mask {
        "placeholder"
    } else {
        "file"
    };
    writeln!(
        writer,
        "{}\t{}\t{}\t{mask_kind}",
        record.id, record.image_bytes, record.mask_bytes
    )
}
