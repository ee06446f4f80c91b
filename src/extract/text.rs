use serde_json::Value;

/// Parse brace-delimited text as JSON, falling back to the raw string.
///
/// Only strings that start with `{` and end with `}` are attempted; anything
/// else, and anything that fails to decode, comes back as `Value::String`.
pub fn try_parse_text(text: &str) -> Value {
    if text.starts_with('{') && text.ends_with('}') {
        match serde_json::from_str::<Value>(text) {
            Ok(parsed) => return parsed,
            Err(e) => log::debug!("Keeping brace-delimited text as string: {}", e),
        }
    }
    Value::String(text.to_string())
}
