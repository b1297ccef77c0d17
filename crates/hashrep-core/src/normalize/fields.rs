//! Per-field display rewrites.

use serde_json::{Map, Number, Value};

const KB: f64 = 1000.0;

/// Human-readable size: above 1000 bytes as decimal kilobytes with two
/// places, otherwise `"{size} bytes"`. Numeric strings are accepted.
pub fn format_size(raw: &Value) -> Option<String> {
    match raw {
        Value::Number(n) => Some(size_label(n.as_f64()?, &number_text(n))),
        Value::String(s) => Some(match s.trim().parse::<f64>() {
            Ok(bytes) => size_label(bytes, s),
            Err(_) => format!("{} bytes", s),
        }),
        _ => None,
    }
}

fn size_label(bytes: f64, shown: &str) -> String {
    if bytes > KB {
        // Ties round up (1125 -> "1.13 KB"), not to even.
        format!("{:.2} KB", (bytes / KB * 100.0).round() / 100.0)
    } else {
        format!("{} bytes", shown)
    }
}

/// Seconds to milliseconds.
pub fn scale_creation_date(raw: &Value) -> Option<Number> {
    let n = match raw {
        Value::Number(n) => n,
        _ => return None,
    };
    if let Some(ms) = n.as_i64().and_then(|s| s.checked_mul(1000)) {
        return Some(Number::from(ms));
    }
    if let Some(ms) = n.as_u64().and_then(|s| s.checked_mul(1000)) {
        return Some(Number::from(ms));
    }
    let ms = n.as_f64()? * 1000.0;
    if ms.fract() == 0.0 && ms.abs() < i64::MAX as f64 {
        return Some(Number::from(ms as i64));
    }
    Number::from_f64(ms)
}

/// Number as display text; integral floats print without a fraction (`500.0` -> `500`).
pub(super) fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

/// Each occurrence (array element or object value) as compact JSON.
pub fn stringify_occurrences(raw: &Value) -> Option<Vec<String>> {
    let items: Vec<&Value> = match raw {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => return None,
    };
    items
        .into_iter()
        .map(|item| serde_json::to_string(item).ok())
        .collect()
}

/// True when `mal_eval_result.probability_bucket` mentions `HIGH`.
pub fn is_malicious(attributes: &Map<String, Value>) -> bool {
    let bucket = attributes
        .get("mal_eval_result")
        .and_then(|m| m.get("probability_bucket"));
    match bucket {
        Some(Value::String(s)) => s.contains("HIGH"),
        Some(Value::Array(items)) => items.iter().any(|v| v.as_str() == Some("HIGH")),
        _ => false,
    }
}
