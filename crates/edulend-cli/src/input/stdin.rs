use serde_json::Value;
use std::io::{self, Read};

/// Read a piped assessment from stdin. JSON objects and arrays are parsed
/// as JSON, anything else as YAML. Returns None for an interactive TTY or
/// an empty pipe.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped(buffer: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: Value = if trimmed.starts_with('{') || trimmed.starts_with('[') {
        serde_json::from_str(trimmed).map_err(|e| format!("Failed to parse stdin as JSON: {e}"))?
    } else {
        serde_yaml::from_str(trimmed).map_err(|e| format!("Failed to parse stdin as YAML: {e}"))?
    };
    tracing::debug!(bytes = trimmed.len(), "input read from stdin");
    Ok(Some(value))
}
