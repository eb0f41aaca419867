//! Scan command - extract line items from a single receipt.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use resibo_core::{ExtractionResult, ReceiptParser, ReceiptRecord, ReceiptScanner, ResiboConfig};

use crate::output::{format_record, format_result, OutputFormat};
use crate::recognizer::CommandRecognizer;

/// Image extensions handed to the OCR command.
pub const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "tif", "tiff", "bmp", "webp"];

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Receipt image, or a .txt file with already recognized text
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Emit the persistence record for this receipt id instead of the result
    #[arg(long)]
    receipt_id: Option<String>,

    /// List lines that matched no layout
    #[arg(long)]
    show_skipped: bool,

    /// Exit with an error when no items are found
    #[arg(long)]
    require_items: bool,
}

/// Kind of input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Image,
}

impl InputKind {
    pub fn detect(path: &Path) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "txt" => Some(InputKind::Text),
            ext if IMAGE_EXTENSIONS.contains(&ext) => Some(InputKind::Image),
            _ => None,
        }
    }
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let format = match args.format {
        Some(format) => format,
        None => OutputFormat::from_name(&config.output.default_format)?,
    };

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Extracting items...");

    let result = extract_file(&args.input, &config).await;
    pb.finish_and_clear();
    let result = result?;

    let result = if args.require_items {
        result.require_items()?
    } else {
        result
    };

    let output = match &args.receipt_id {
        Some(receipt_id) => {
            let record = ReceiptRecord::from_result(receipt_id.as_str(), &result, chrono::Utc::now());
            format_record(&record)?
        }
        None => format_result(&result, format, &config.extraction.currency_symbol)?,
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
    }

    if args.show_skipped && !result.unmatched_lines.is_empty() {
        eprintln!("{}", style("Skipped lines:").yellow());
        for line in &result.unmatched_lines {
            eprintln!("  - {}", line);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Extract one receipt file according to its kind.
pub async fn extract_file(path: &Path, config: &ResiboConfig) -> anyhow::Result<ExtractionResult> {
    let parser = ReceiptParser::from_config(&config.extraction);

    match InputKind::detect(path) {
        Some(InputKind::Text) => {
            let text = fs::read_to_string(path)?;
            Ok(parser.extract(&text))
        }
        Some(InputKind::Image) => {
            let scanner = ReceiptScanner::new(CommandRecognizer::from_config(&config.ocr))
                .with_extractor(parser);
            Ok(scanner.scan(path).await?)
        }
        None => anyhow::bail!("Unsupported file format: {}", path.display()),
    }
}
