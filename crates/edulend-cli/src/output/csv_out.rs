use serde_json::Value;
use std::io;

use super::{flatten, format_scalar, result_of};

/// Write output as a two-column `field,value` CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = result_of(value);
    if result.is_object() {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in flatten(result) {
            let _ = wtr.write_record([key.as_str(), &format_scalar(&val)]);
        }
    } else {
        let _ = wtr.write_record([&format_scalar(result)]);
    }

    let _ = wtr.flush();
}
