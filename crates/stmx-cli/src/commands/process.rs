//! Process command - extract identifiers from a statement file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use stmx_core::models::config::VpMode;
use stmx_core::{ExtractionPipeline, PipelineOutput};

use crate::export::{records_to_csv, summary_text};
use crate::ingest::read_statement;

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Statement file (CSV)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Render amounts with a decimal comma
    #[arg(long)]
    decimal_comma: bool,

    /// Field delimiter for CSV output
    #[arg(long)]
    delimiter: Option<char>,

    /// Use the legacy VP rules (8 digits, ";6xxxxxxx;" fallback)
    #[arg(long)]
    legacy_vp: bool,

    /// Extract rows in parallel
    #[arg(long)]
    parallel: bool,

    /// Print summary counters to stderr
    #[arg(long)]
    summary: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (records and summary)
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    records: &'a [stmx_core::OutputRecord],
    summary: &'a stmx_core::SummaryCounters,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.decimal_comma {
        config.export.decimal_comma = true;
    }
    if let Some(delimiter) = args.delimiter {
        config.export.delimiter = delimiter;
    }
    if args.legacy_vp {
        config.extraction.vp_mode = VpMode::Legacy;
    }
    if args.parallel {
        config.parallel = true;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let table = read_statement(&args.input)?;
    let pipeline = ExtractionPipeline::new(&config)?;
    let result = pipeline.run(&table)?;

    let output = match args.format {
        OutputFormat::Csv => records_to_csv(&result.records, &config.export)?,
        OutputFormat::Json => format_json(&result)?,
        OutputFormat::Text => summary_text(&result.summary),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} records written to {}",
            style("✓").green(),
            result.records.len(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    if args.summary {
        eprintln!();
        eprint!("{}", summary_text(&result.summary));
        if result.summary.no_identifiers > 0 {
            eprintln!(
                "{} {} credited rows carry no identifier",
                style("ℹ").blue(),
                result.summary.no_identifiers
            );
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_json(result: &PipelineOutput) -> anyhow::Result<String> {
    let json = serde_json::to_string_pretty(&JsonOutput {
        records: &result.records,
        summary: &result.summary,
    })?;
    Ok(json + "\n")
}
