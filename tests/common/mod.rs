//! Shared helpers for integration tests.
#![allow(dead_code)]

use anyhow::{Context, Result};
use lark_notify::Card;
use serde_json::Value;

/// Serialize a card to its wire JSON.
pub fn card_value(card: &Card) -> Result<Value> {
    card.to_value().context("serialize card")
}

/// The ordered body elements of a card.
pub fn body_elements(card: &Card) -> Result<Vec<Value>> {
    let value = card_value(card)?;
    let elements = value["body"]["elements"]
        .as_array()
        .context("body.elements missing")?
        .clone();
    Ok(elements)
}

/// Assert the serialized tree contains no JSON nulls: omitted optional
/// fields must be absent entirely.
pub fn assert_no_nulls(value: &Value, path: &str) {
    match value {
        Value::Null => panic!("null at {path}"),
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                assert_no_nulls(item, &format!("{path}[{idx}]"));
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                assert_no_nulls(item, &format!("{path}.{key}"));
            }
        }
        _ => {}
    }
}
