use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{cell, flatten};

/// Format output as tables using the tabled crate.
///
/// Scalar fields of the result go into one Field/Value table; each array of
/// objects (schedules, scenarios, holding periods) gets its own table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_tables(result);
                print_envelope_notes(map);
            } else {
                print_result_tables(value);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_tables(result: &Value) {
    let mut rows = Vec::new();
    flatten("", result, &mut rows);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut nested: Vec<(String, Vec<Value>)> = Vec::new();
    for (field, val) in rows {
        match val {
            Value::Array(items) if items.iter().any(Value::is_object) => {
                nested.push((field, items));
            }
            Value::Array(items) => {
                let joined: Vec<String> = items.iter().map(cell).collect();
                builder.push_record([field, joined.join(", ")]);
            }
            other => builder.push_record([field, cell(&other)]),
        }
    }
    println!("{}", Table::from(builder));

    for (field, items) in nested {
        println!("\n{}:", field);
        print_array_table(&items);
    }
}

fn print_envelope_notes(envelope: &serde_json::Map<String, Value>) {
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

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if arr.iter().all(Value::is_object) {
        let flattened: Vec<Vec<(String, Value)>> = arr
            .iter()
            .map(|item| {
                let mut rows = Vec::new();
                flatten("", item, &mut rows);
                rows
            })
            .collect();

        let headers: Vec<String> = flattened[0].iter().map(|(f, _)| f.clone()).collect();
        let mut builder = Builder::default();
        builder.push_record(headers.clone());
        for rows in &flattened {
            let row: Vec<String> = headers
                .iter()
                .map(|h| {
                    rows.iter()
                        .find(|(f, _)| f == h)
                        .map(|(_, v)| cell(v))
                        .unwrap_or_default()
                })
                .collect();
            builder.push_record(row);
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", cell(item));
        }
    }
}
