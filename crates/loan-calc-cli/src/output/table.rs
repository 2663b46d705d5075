use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::format_scalar;

/// Format the output envelope as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value.as_object() {
        Some(envelope) => print_envelope(envelope),
        None => println!("{}", format_scalar(value)),
    }
}

fn print_envelope(envelope: &Map<String, Value>) {
    if let Some(Value::Object(result)) = envelope.get("result") {
        println!("{}", scalar_table(result));

        if let Some(Value::Array(payments)) = result.get("payments") {
            println!();
            println!("{}", array_table(payments));
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Field/value table of every non-array field.
fn scalar_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if val.is_array() {
            continue;
        }
        builder.push_record([key.clone(), format_scalar(val)]);
    }
    builder.build()
}

/// One row per object, headers from the first object's keys.
fn array_table(arr: &[Value]) -> Table {
    let mut builder = Builder::default();
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        builder.push_record(headers.clone());
        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h).map(format_scalar).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
    }
    builder.build()
}
