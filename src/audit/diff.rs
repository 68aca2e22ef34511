//! Field-level change summaries for audit entries

use serde_json::Value;

/// Summarize the top-level fields that differ between two JSON states
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes: Vec<String> = before_obj
                .iter()
                .filter_map(|(key, old)| match after_obj.get(key) {
                    Some(new) if new != old => {
                        Some(format!("{}: {} -> {}", key, format_value(old), format_value(new)))
                    }
                    Some(_) => None,
                    None => Some(format!("{}: {} -> (removed)", key, format_value(old))),
                })
                .collect();

            changes.extend(
                after_obj
                    .iter()
                    .filter(|(key, _)| !before_obj.contains_key(*key))
                    .map(|(key, new)| format!("{}: (added) -> {}", key, format_value(new))),
            );
            changes
        }
        _ if before != after => vec![format!("{} -> {}", format_value(before), format_value(after))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > 40 => {
            let head: String = s.chars().take(37).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
