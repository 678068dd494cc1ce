use serde_json::Value;
use std::io;

use super::{cell, flatten};

/// Write the result as two-column `field,value` CSV to stdout.
///
/// Nested objects become dotted field names and array elements are indexed,
/// e.g. `holding_period.periods[2].roi_pct`.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let _ = wtr.write_record(["field", "value"]);
    for (field, val) in csv_rows(result) {
        let _ = wtr.write_record([field, val]);
    }

    let _ = wtr.flush();
}

fn csv_rows(value: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten("", value, &mut rows);

    let mut out = Vec::with_capacity(rows.len());
    for (field, val) in rows {
        expand(field, val, &mut out);
    }
    out
}

fn expand(field: String, value: Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Array(items) => {
            for (i, item) in items.into_iter().enumerate() {
                let mut nested = Vec::new();
                flatten(&format!("{field}[{i}]"), &item, &mut nested);
                for (f, v) in nested {
                    expand(f, v, out);
                }
            }
        }
        other => out.push((field, cell(&other))),
    }
}
