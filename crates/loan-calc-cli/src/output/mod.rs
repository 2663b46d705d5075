pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;
pub mod text;

use loan_calc_core::calculator::DerivationResult;
use loan_calc_core::ComputationOutput;
use serde_json::Value;

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(
    format: &OutputFormat,
    output: &ComputationOutput<DerivationResult>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Text => text::print_text(&output.result),
        OutputFormat::Json => json::print_json(&output.to_json()?)?,
        OutputFormat::Table => table::print_table(&output.to_json()?),
        OutputFormat::Csv => csv_out::print_csv(&output.to_json()?)?,
        OutputFormat::Minimal => minimal::print_minimal(&output.to_json()?),
    }
    Ok(())
}

/// Whole amounts print without a trailing ".0"; `null` stands in for
/// non-finite values, which JSON cannot carry.
pub fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 => format!("{f:.0}"),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
