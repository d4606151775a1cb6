use serde_json::Value;

use super::{flatten, format_scalar, result_of};

/// Key answers, most specific first.
const PRIORITY_KEYS: [&str; 8] = [
    "learn_score.total",
    "grade",
    "level",
    "recommended",
    "monthly_payment",
    "expected_return",
    "prefill_rate",
    "total",
];

/// Print just the key answer value from the output, falling back to the
/// first field of the result.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

fn minimal_answer(value: &Value) -> String {
    let rows = flatten(result_of(value));

    for key in PRIORITY_KEYS {
        if let Some((_, val)) = rows.iter().find(|(k, v)| k == key && !v.is_null()) {
            return format_scalar(val);
        }
    }

    match rows.first() {
        Some((key, val)) => format!("{}: {}", key, format_scalar(val)),
        None => format_scalar(result_of(value)),
    }
}
