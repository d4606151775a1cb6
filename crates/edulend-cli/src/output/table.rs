use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten, format_scalar, result_of};

/// Format output as a Field/Value table followed by any envelope warnings
/// and the methodology line.
pub fn print_table(value: &Value) {
    let result = result_of(value);
    if !result.is_object() {
        println!("{}", format_scalar(result));
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten(result) {
        builder.push_record([key, format_scalar(&val)]);
    }
    println!("{}", Table::from(builder));

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
