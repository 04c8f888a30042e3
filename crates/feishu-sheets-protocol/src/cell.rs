//! Cell values on the wire.

use feishu_sheets_core::{CellValue, Formula, Image};
use serde_json::{json, Map, Value};

/// `type` tag of formula cells.
pub const CELL_TYPE_FORMULA: &str = "formula";

/// `type` tag of embedded image cells.
pub const CELL_TYPE_EMBED_IMAGE: &str = "embed-image";

/// Largest integer an f64 holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Encode a cell for the value write endpoint.
///
/// Images cannot be written through this endpoint and encode as empty text;
/// they are uploaded separately.
pub fn encode_cell(value: &CellValue) -> Value {
    match value {
        CellValue::Empty => Value::Null,
        CellValue::Boolean(b) => Value::Bool(*b),
        CellValue::Number(n) => encode_number(*n),
        CellValue::Text(s) => Value::String(s.clone()),
        CellValue::Formula(f) => json!({"type": CELL_TYPE_FORMULA, "text": f.text}),
        CellValue::Image(_) => Value::String(String::new()),
        CellValue::Other(v) => v.clone(),
    }
}

/// Encode a cell for display, keeping images as their read-side object.
pub fn encode_cell_for_display(value: &CellValue) -> Value {
    match value {
        CellValue::Image(img) => match img.file_token() {
            Some(token) => json!({"type": CELL_TYPE_EMBED_IMAGE, "fileToken": token}),
            None => Value::String(img.to_string()),
        },
        other => encode_cell(other),
    }
}

/// Decode a cell returned by the value read endpoint.
pub fn decode_cell(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::Bool(b) => CellValue::Boolean(b),
        Value::Number(n) => match n.as_f64() {
            Some(f) => CellValue::Number(f),
            None => CellValue::Other(Value::Number(n)),
        },
        Value::String(s) => CellValue::Text(s),
        Value::Object(map) => decode_object(map),
        other => CellValue::Other(other),
    }
}

pub fn encode_grid(values: &[Vec<CellValue>]) -> Vec<Vec<Value>> {
    values
        .iter()
        .map(|row| row.iter().map(encode_cell).collect())
        .collect()
}

pub fn decode_grid(values: Vec<Vec<Value>>) -> Vec<Vec<CellValue>> {
    values
        .into_iter()
        .map(|row| row.into_iter().map(decode_cell).collect())
        .collect()
}

fn decode_object(map: Map<String, Value>) -> CellValue {
    match map.get("type").and_then(Value::as_str) {
        Some(CELL_TYPE_EMBED_IMAGE) => {
            if let Some(token) = map.get("fileToken").and_then(Value::as_str) {
                return CellValue::Image(Image::from_token(token));
            }
        }
        Some(CELL_TYPE_FORMULA) => {
            if let Some(text) = map.get("text").and_then(Value::as_str) {
                return CellValue::Formula(Formula::new(text));
            }
        }
        _ => {}
    }
    CellValue::Other(Value::Object(map))
}

fn encode_number(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Value::from(n as i64);
    }
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
