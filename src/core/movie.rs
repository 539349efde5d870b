use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single movie item. `info` is stored and returned untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub year: i64,
    pub title: String,
    #[serde(default)]
    pub info: Value,
}

impl Movie {
    pub fn new(year: i64, title: impl Into<String>, info: Value) -> Self {
        Self {
            year,
            title: title.into(),
            info,
        }
    }

    pub fn key(&self) -> MovieKey {
        MovieKey {
            year: self.year,
            title: self.title.clone(),
        }
    }
}

/// Composite primary key: `year` is the partition component, `title` the sort component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MovieKey {
    pub year: i64,
    pub title: String,
}

impl fmt::Display for MovieKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:?})", self.year, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extra_attributes_are_dropped() {
        let movie: Movie = serde_json::from_value(json!({
            "year": 2013,
            "title": "Rush",
            "info": {"rating": 8.3},
            "poster": "ignored"
        }))
        .unwrap();
        assert_eq!(movie, Movie::new(2013, "Rush", json!({"rating": 8.3})));
    }

    #[test]
    fn test_missing_info_is_null() {
        let movie: Movie = serde_json::from_str(r#"{"year": 2000, "title": "Gladiator"}"#).unwrap();
        assert_eq!(movie.info, Value::Null);
    }

    #[test]
    fn test_key_display() {
        let key = Movie::new(2001, "Training Day", Value::Null).key();
        assert_eq!(key.to_string(), r#"(2001, "Training Day")"#);
    }
}
