use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single control's value as the user entered it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Choice(String),
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}

impl From<u32> for RawValue {
    fn from(v: u32) -> Self {
        RawValue::Number(v as f64)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Choice(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Choice(v)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(v) => write!(f, "{v}"),
            RawValue::Choice(s) => write!(f, "{s}"),
        }
    }
}

/// Field name -> raw value, one entry per control. Built fresh per submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInputRecord {
    fields: BTreeMap<String, RawValue>,
}

impl RawInputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<RawValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&RawValue> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawInputRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = RawInputRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_deserializes_numbers_and_choices() {
        let r: RawInputRecord =
            serde_json::from_value(json!({"Age": 30, "Gender": "Male"})).unwrap();
        assert_eq!(r.get("Age"), Some(&RawValue::Number(30.0)));
        assert_eq!(r.get("Gender"), Some(&RawValue::Choice("Male".into())));
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn later_insert_replaces_earlier_value() {
        let r = RawInputRecord::new().with("Age", 30u32).with("Age", 41.5);
        assert_eq!(r.get("Age"), Some(&RawValue::Number(41.5)));
        assert_eq!(r.len(), 1);
    }
}
