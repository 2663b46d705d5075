use serde_json::Value;
use std::io::{self, Write};

use super::format_scalar;

/// Write the result as CSV to stdout.
pub fn print_csv(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    write_csv(stdout.lock(), value)
}

/// Schedules become `month,payment` rows closed by an `overpayment` row;
/// every other result is a two-column `field,value` listing.
fn write_csv<W: Write>(writer: W, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(writer);
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            if let Some(Value::Array(payments)) = map.get("payments") {
                wtr.write_record(["month", "payment"])?;
                for row in payments {
                    wtr.write_record([
                        row.get("month").map(format_scalar).unwrap_or_default(),
                        row.get("payment").map(format_scalar).unwrap_or_default(),
                    ])?;
                }
                if let Some(over) = map.get("overpayment") {
                    wtr.write_record(["overpayment".to_string(), format_csv_value(over)])?;
                }
            } else {
                wtr.write_record(["field", "value"])?;
                for (key, val) in map {
                    wtr.write_record([key.clone(), format_csv_value(val)])?;
                }
            }
        }
        other => wtr.write_record([format_csv_value(other)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => format_scalar(other),
    }
}
