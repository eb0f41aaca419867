//! Output formatting for extraction results.

use resibo_core::receipt::rules::format_amount;
use resibo_core::{ExtractionResult, ReceiptRecord};

/// Output format for a single receipt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV of line items
    Csv,
    /// Plain text table
    Text,
}

impl OutputFormat {
    /// Resolve a format name from the configuration file.
    pub fn from_name(name: &str) -> anyhow::Result<Self> {
        <Self as clap::ValueEnum>::from_str(name, true)
            .map_err(|_| anyhow::anyhow!("Unknown output format in config: {}", name))
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_result(
    result: &ExtractionResult,
    format: OutputFormat,
    currency_symbol: &str,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result, currency_symbol)),
    }
}

/// Persistence payload as JSON.
pub fn format_record(record: &ReceiptRecord) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["name", "quantity", "unit_price", "amount"])?;

    for item in &result.items {
        wtr.write_record([
            item.name.as_str(),
            &item.quantity.to_string(),
            &item.unit_price.to_string(),
            &item.amount.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult, currency_symbol: &str) -> String {
    if result.is_empty() {
        return "No valid items found.\n".to_string();
    }

    let width = result
        .items
        .iter()
        .map(|i| i.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Item".len());

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:>5}  {:>12}  {:>12}\n",
        "Item", "Qty", "Price", "Amount"
    ));

    for item in &result.items {
        output.push_str(&format!(
            "{:<width$}  {:>5}  {:>12}  {:>12}\n",
            item.name.to_uppercase(),
            item.quantity.to_string(),
            format_amount(item.unit_price, currency_symbol),
            format_amount(item.amount, currency_symbol),
        ));
    }

    output.push_str(&format!(
        "\nTotal Amount: {}\n",
        format_amount(result.total, currency_symbol)
    ));

    output
}
