use serde_json::Value;

use super::format_scalar;

/// Result fields, most specific first.
const PRIORITY_KEYS: [&str; 4] = ["months", "payment", "principal", "overpayment"];

/// Print just the derived value from the output envelope.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_value(value));
}

fn minimal_value(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key) {
                return format_scalar(val);
            }
        }
    }

    format_scalar(result_obj)
}
