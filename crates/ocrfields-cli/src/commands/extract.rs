//! Extract command - extract fields from a single recognition output file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::debug;

use ocrfields_core::ConfidencePolicy;

use super::{format_report, load_config, process_file, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Recognition output file (JSON with `blocks` or `pages`)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Re-sort blocks top-to-bottom, left-to-right before extraction
    #[arg(long)]
    reorder: bool,

    /// Do not pair total labels with amounts on another page
    #[arg(long)]
    isolate_pages: bool,

    /// Reject blocks with confidence outside [0, 1] instead of clamping
    #[arg(long)]
    strict: bool,

    /// Show a confidence summary after the output
    #[arg(long)]
    show_confidence: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;

    if args.reorder {
        config.input.reorder_blocks = true;
    }
    if args.isolate_pages {
        config.extraction.isolate_pages = true;
    }
    if args.strict {
        config.input.confidence_policy = ConfidencePolicy::Strict;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let report = process_file(&args.input, &config)?;
    let output = format_report(&report, args.format, config.output.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        println!();
        for (name, field) in report.fields.iter() {
            match field {
                Some(f) => println!(
                    "{} {}: {:.1}%",
                    style("ℹ").blue(),
                    name,
                    f.confidence * 100.0
                ),
                None => println!("{} {}: not found", style("ℹ").blue(), name),
            }
        }
    }

    debug!("Processing time: {}ms", report.time_ms);

    Ok(())
}
