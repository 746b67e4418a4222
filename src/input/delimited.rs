use tracing::debug;

use crate::genes::resolve_key;
use crate::input::FeatureUpload;

/// Every line is a `key,value` or `key;value` pair; there is no header row.
/// Lines whose key is not recognized, or that carry no value, are skipped.
pub fn parse_delimited(text: &str) -> FeatureUpload {
    let mut upload = FeatureUpload::default();
    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut parts = line.split([',', ';']);
        let key = parts.next().unwrap_or("");
        let Some(matched) = resolve_key(key) else {
            debug!(line = line_no + 1, "skipping unrecognized key");
            continue;
        };
        let Some(value) = parts.next() else {
            debug!(line = line_no + 1, "skipping key without value");
            continue;
        };
        upload.set(matched, value.trim().to_string());
    }
    upload
}
