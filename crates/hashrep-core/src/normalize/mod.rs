//! Reshape reputation API bodies into summary tags and a display record.
//!
//! The upstream body is passed through mostly untouched. A few attribute
//! fields are rewritten for display (size, creation date, occurrences) and an
//! `isMalicious` flag is derived from the probability bucket. Rewritten fields
//! live in typed slots; everything else stays in flattened pass-through maps.

mod fields;

pub use fields::{format_size, is_malicious, scale_creation_date, stringify_occurrences};

use serde::Serialize;
use serde_json::{Map, Value};

/// Normalized data for a hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultData {
    /// Zero or one probability-bucket label.
    pub summary: Vec<String>,
    pub details: Details,
}

/// Top-level body with `data` replaced by the normalized record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Details {
    #[serde(flatten)]
    pub rest: Map<String, Value>,
    pub data: FileData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileData {
    #[serde(flatten)]
    pub rest: Map<String, Value>,
    #[serde(rename = "isMalicious")]
    pub is_malicious: bool,
    pub attributes: FileAttributes,
}

/// File attributes. A typed slot is filled only when the upstream value was
/// present and rewritten; otherwise the raw value (if any) stays in `rest`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileAttributes {
    #[serde(flatten)]
    pub rest: Map<String, Value>,
    /// `"1.50 KB"` or `"500 bytes"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Milliseconds since the epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<serde_json::Number>,
    /// Each occurrence as compact JSON text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<Vec<String>>,
}

/// Parse a 200 body. `Ok(None)` is a miss: empty body, JSON `null`, or `[]`.
pub fn classify_body(raw: &[u8]) -> Result<Option<Value>, serde_json::Error> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let body: Value = serde_json::from_slice(raw)?;
    let miss = match &body {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        _ => false,
    };
    Ok(if miss { None } else { Some(body) })
}

/// `data.attributes.mal_eval_result.probability_bucket`, when it is truthy.
/// Non-string buckets are kept as their text form.
pub fn summary_tags(body: &Value) -> Vec<String> {
    body.pointer("/data/attributes/mal_eval_result/probability_bucket")
        .filter(|v| truthy(v))
        .map(|v| match v {
            Value::String(s) => s.clone(),
            Value::Number(n) => fields::number_text(n),
            other => other.to_string(),
        })
        .into_iter()
        .collect()
}

/// Normalize a hit body.
pub fn normalize(body: Value) -> ResultData {
    let summary = summary_tags(&body);
    let mut rest = match body {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let data = normalize_data(rest.remove("data"));
    ResultData {
        summary,
        details: Details { rest, data },
    }
}

fn normalize_data(data: Option<Value>) -> FileData {
    let mut rest = match data {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    rest.remove("isMalicious");
    let attributes = match rest.remove("attributes") {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    FileData {
        rest,
        is_malicious: is_malicious(&attributes),
        attributes: normalize_attributes(attributes),
    }
}

fn normalize_attributes(mut attrs: Map<String, Value>) -> FileAttributes {
    let size = rewrite(&mut attrs, "size", format_size);
    let creation_date = rewrite(&mut attrs, "creation_date", scale_creation_date);
    let occurrences = rewrite(&mut attrs, "occurrences", stringify_occurrences);
    FileAttributes {
        rest: attrs,
        size,
        creation_date,
        occurrences,
    }
}

/// Move `key` into a typed slot when it is truthy and `f` accepts it.
fn rewrite<T>(
    attrs: &mut Map<String, Value>,
    key: &str,
    f: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
    let out = attrs.get(key).filter(|v| truthy(v)).and_then(f)?;
    attrs.remove(key);
    Some(out)
}

/// Falsy values (null, false, 0, "") count as absent.
fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
