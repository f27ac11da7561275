use serde_json::{Map, Value};

use super::LlmError;

/// Return the first balanced `{...}` region of `text`.
///
/// Braces inside JSON string literals (including escaped quotes) do not
/// count toward nesting. An opening brace that never closes is skipped and
/// the scan resumes at the next one.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut start = 0;
    while let Some(offset) = text[start..].find('{') {
        let open = start + offset;
        if let Some(close) = matching_brace(bytes, open) {
            return Some(&text[open..=close]);
        }
        start = open + 1;
    }
    None
}

fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extract and parse the first JSON object in a model response.
pub fn parse_json_object(text: &str) -> Result<Map<String, Value>, LlmError> {
    let raw = extract_json_object(text)
        .ok_or_else(|| LlmError::MalformedResponse("No JSON object found".into()))?;
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(LlmError::MalformedResponse("JSON is not an object".into())),
        Err(e) => Err(LlmError::MalformedResponse(e.to_string())),
    }
}

/// Coerce a JSON value into a list of strings: arrays keep their
/// non-empty string items, scalars become a one-element list.
pub fn coerce_string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) if s.trim().is_empty() => Vec::new(),
        Some(Value::String(s)) => vec![s.trim().to_string()],
        Some(Value::Bool(false)) => Vec::new(),
        Some(other) => vec![other.to_string()],
    }
}
