use serde_json::Value;

/// Walk `path` through nested objects.
/// A missing key, or an intermediate that is not an object (including `null`),
/// yields `None`. A present terminal value is returned as-is, `null` included.
pub fn lookup_path<'a>(v: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(v, |cur, key| cur.as_object()?.get(*key))
}

/// Text of a post for scoring. Non-string values score as empty text.
pub fn text_of(v: &Value) -> &str {
    v.as_str().unwrap_or("")
}

/// Render one table cell as flat text: strings raw, `null` empty,
/// numbers/bools as JSON literals, arrays and objects as compact JSON.
pub fn render_cell(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
