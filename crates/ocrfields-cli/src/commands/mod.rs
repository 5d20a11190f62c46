//! CLI commands and the file pipeline they share.

pub mod batch;
pub mod config;
pub mod extract;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use ocrfields_core::{
    FieldExtractor, FieldName, FieldSet, OcrFieldsConfig, RecognitionOutput, RuleFieldExtractor,
};

/// Output format
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Extraction result for one input file.
#[derive(Debug, Clone, Serialize)]
pub struct FieldReport {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    pub page_count: usize,
    pub block_count: usize,
    pub fields: FieldSet,
    pub processed_at: DateTime<Utc>,
    pub time_ms: f64,
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ocrfields")
        .join("config.json")
}

/// Load the config given on the command line, else the default file if present.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<OcrFieldsConfig> {
    if let Some(path) = config_path {
        return Ok(OcrFieldsConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(OcrFieldsConfig::from_file(&default_path)?)
    } else {
        Ok(OcrFieldsConfig::default())
    }
}

/// Read one recognition output file and extract its fields.
pub fn process_file(path: &Path, config: &OcrFieldsConfig) -> anyhow::Result<FieldReport> {
    let start = Instant::now();

    let json = fs::read_to_string(path)?;
    let output = RecognitionOutput::from_json(&json)?;
    let engine = output.engine().map(str::to_string);

    let mut document = output.into_document(config.input.confidence_policy)?;
    if config.input.reorder_blocks {
        document.sort_by_reading_order();
    }

    debug!(
        "{} has {} pages, {} blocks",
        path.display(),
        document.page_count(),
        document.block_count()
    );

    let extractor = RuleFieldExtractor::from_config(&config.extraction);
    let fields = extractor.extract_document(&document);

    info!(
        "Extracted {}/{} fields from {}",
        fields.found_count(),
        FieldName::ALL.len(),
        path.display()
    );

    Ok(FieldReport {
        source: path.display().to_string(),
        engine,
        page_count: document.page_count(),
        block_count: document.block_count(),
        fields,
        processed_at: Utc::now(),
        time_ms: (start.elapsed().as_secs_f64() * 1000.0 * 100.0).round() / 100.0,
    })
}

pub fn format_report(
    report: &FieldReport,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
        OutputFormat::Csv => format_csv([report]),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

const CSV_HEADER: [&str; 8] = [
    "source",
    "date",
    "date_confidence",
    "total",
    "total_confidence",
    "total_amount",
    "cnpj_cpf",
    "cnpj_cpf_confidence",
];

/// One CSV row per report.
pub fn format_csv<'a>(
    reports: impl IntoIterator<Item = &'a FieldReport>,
) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;

    for report in reports {
        let mut record = vec![report.source.clone()];
        for (name, field) in report.fields.iter() {
            record.push(field.map(|f| f.value.clone()).unwrap_or_default());
            record.push(field.map(|f| f.confidence.to_string()).unwrap_or_default());
            if name == FieldName::Total {
                record.push(
                    report
                        .fields
                        .total_amount()
                        .map(|a| a.to_string())
                        .unwrap_or_default(),
                );
            }
        }
        wtr.write_record(&record)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(report: &FieldReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Source: {}\n", report.source));
    if let Some(engine) = &report.engine {
        output.push_str(&format!("Engine: {}\n", engine));
    }
    output.push_str(&format!(
        "Pages: {}, blocks: {}\n\n",
        report.page_count, report.block_count
    ));

    for (name, field) in report.fields.iter() {
        match field {
            Some(f) => output.push_str(&format!(
                "  {:<9} {} ({:.1}%)\n",
                name.as_str(),
                f.value,
                f.confidence * 100.0
            )),
            None => output.push_str(&format!("  {:<9} -\n", name.as_str())),
        }
    }

    output
}
