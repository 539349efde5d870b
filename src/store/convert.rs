//! JSON <-> DynamoDB attribute conversion for movie items.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};

use crate::core::{Movie, ReelError};

use super::schema::{ATTR_INFO, ATTR_TITLE, ATTR_YEAR};

pub(crate) type Item = HashMap<String, AttributeValue>;

pub(crate) fn movie_to_item(movie: &Movie) -> Item {
    HashMap::from([
        (ATTR_YEAR.to_string(), AttributeValue::N(movie.year.to_string())),
        (ATTR_TITLE.to_string(), AttributeValue::S(movie.title.clone())),
        (ATTR_INFO.to_string(), json_to_attr(&movie.info)),
    ])
}

pub(crate) fn item_to_movie(item: &Item) -> Result<Movie, ReelError> {
    let year = item
        .get(ATTR_YEAR)
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse::<i64>().ok())
        .ok_or_else(|| ReelError::StoreError(format!("item without numeric '{ATTR_YEAR}'")))?;
    let title = item
        .get(ATTR_TITLE)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| ReelError::StoreError(format!("item without string '{ATTR_TITLE}'")))?;
    let info = item
        .get(ATTR_INFO)
        .and_then(attr_to_json)
        .unwrap_or(Value::Null);
    Ok(Movie { year, title, info })
}

pub(crate) fn json_to_attr(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(json_to_attr).collect()),
        Value::Object(obj) => AttributeValue::M(
            obj.iter()
                .map(|(k, v)| (k.clone(), json_to_attr(v)))
                .collect(),
        ),
    }
}

/// Binary and set attributes have no JSON counterpart and are skipped.
pub(crate) fn attr_to_json(attr: &AttributeValue) -> Option<Value> {
    match attr {
        AttributeValue::S(s) => Some(Value::String(s.clone())),
        AttributeValue::N(n) => {
            if let Ok(i) = n.parse::<i64>() {
                Some(Value::Number(i.into()))
            } else {
                n.parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
            }
        }
        AttributeValue::Bool(b) => Some(Value::Bool(*b)),
        AttributeValue::Null(_) => Some(Value::Null),
        AttributeValue::L(items) => Some(Value::Array(
            items.iter().filter_map(attr_to_json).collect(),
        )),
        AttributeValue::M(map) => Some(Value::Object(
            map.iter()
                .filter_map(|(k, v)| attr_to_json(v).map(|val| (k.clone(), val)))
                .collect::<Map<_, _>>(),
        )),
        _ => None,
    }
}
