//! Partial-update filtering.
//!
//! Stage one validates the payload against the partial schema; stage two drops
//! `null` and blank-string fields so untouched form inputs never overwrite
//! stored values. `false` and `0` are real values and survive.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::schema::{from_object, Schema};
use crate::errors::AppError;

pub const EMPTY_PAYLOAD: &str = "Update payload must be a non-empty object";
pub const NO_VALID_FIELDS: &str = "No valid fields to update";

pub fn filter_update(input: &Value, schema: &Schema) -> Result<Map<String, Value>, AppError> {
    match input.as_object() {
        Some(obj) if !obj.is_empty() => {}
        _ => return Err(AppError::validation(EMPTY_PAYLOAD, Vec::new())),
    }

    let partial;
    let schema = if schema.is_partial() {
        schema
    } else {
        partial = schema.partial();
        &partial
    };

    let filtered: Map<String, Value> = schema
        .validate(input)?
        .into_iter()
        .filter(|(_, v)| !is_empty_value(v))
        .collect();

    if filtered.is_empty() {
        return Err(AppError::validation(NO_VALID_FIELDS, Vec::new()));
    }
    Ok(filtered)
}

/// [`filter_update`] followed by deserialization into a patch type.
pub fn filter_update_as<T: DeserializeOwned>(input: &Value, schema: &Schema) -> Result<T, AppError> {
    let map = filter_update(input, schema)?;
    from_object(schema.name(), map)
}

fn is_empty_value(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
