use serde_json::Value;

use crate::error::ParseError;
use crate::genes::resolve_key;
use crate::input::FeatureUpload;

pub fn parse_json(text: &str) -> Result<FeatureUpload, ParseError> {
    let value: Value = serde_json::from_str(text).map_err(|e| ParseError::Json(e.to_string()))?;
    let map = match value {
        Value::Object(map) => map,
        other => return Err(ParseError::NotAnObject(json_kind(&other))),
    };

    let mut upload = FeatureUpload::default();
    // Document order: a later case variant of a key overwrites an earlier one.
    for (key, value) in &map {
        if let Some(matched) = resolve_key(key) {
            upload.set(matched, value_text(value));
        }
    }
    Ok(upload)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
