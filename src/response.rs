//! Shape checks for the status API body before anything reads individual records.
use serde_json::Value;

use crate::error::ShapeError;

pub const ITEMS_FIELD: &str = "homeworks";
pub const CURSOR_FIELD: &str = "current_date";

/// Validate the top-level shape and return the raw homework records.
pub fn validate(raw: &Value) -> Result<&[Value], ShapeError> {
    let map = raw.as_object().ok_or(ShapeError::NotAMapping)?;
    let items = map.get(ITEMS_FIELD).ok_or(ShapeError::MissingItems)?;
    items
        .as_array()
        .map(Vec::as_slice)
        .ok_or(ShapeError::ItemsNotAList)
}

/// Cursor the API suggests for the next poll, if it sent a usable one.
pub fn next_cursor(raw: &Value) -> Option<i64> {
    raw.get(CURSOR_FIELD).and_then(Value::as_i64)
}
