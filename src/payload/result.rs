//! Decode results and the repeatable-field merge.

use serde::{Deserialize, Serialize, Serializer};

use crate::payload::field::FieldFormatter;
use crate::payload::issue::DecodeIssue;
use crate::payload::unit::Unit;
use crate::payload::value::{Record, Value};

/// Where the decoded fields sit in the output record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputShape {
    /// `{"data": {...fields}, "errors": [...]}`
    #[default]
    Nested,
    /// `{...fields, "errors": [...]}`
    Flat,
}

/// Output of one decode: the (possibly partial) record plus accumulated issues.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeResult {
    pub data: Record,
    pub errors: Vec<DecodeIssue>,
    pub shape: OutputShape,
}

impl DecodeResult {
    pub fn new(data: Record, errors: Vec<DecodeIssue>, shape: OutputShape) -> Self {
        Self {
            data,
            errors,
            shape,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// The record in the selected shape. `errors` is always present.
    pub fn to_record(&self) -> Record {
        let errors = Value::List(
            self.errors
                .iter()
                .map(|issue| Value::Text(issue.to_string()))
                .collect(),
        );
        match self.shape {
            OutputShape::Nested => {
                let mut out = Record::new();
                out.insert("data", self.data.clone());
                out.insert("errors", errors);
                out
            }
            OutputShape::Flat => {
                let mut out = self.data.clone();
                out.insert("errors", errors);
                out
            }
        }
    }
}

impl Serialize for DecodeResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

/// Merge the occurrences of a repeatable field.
///
/// None for zero occurrences, the value itself for one, a list in encounter
/// order for more.
pub fn merge_occurrences(mut values: Vec<Value>) -> Option<Value> {
    match values.len() {
        0 => None,
        1 => values.pop(),
        _ => Some(Value::List(values)),
    }
}

/// Collects `(name, value, unit)` triples in encounter order and merges
/// repeated names with [`merge_occurrences`].
#[derive(Debug, Default)]
pub struct Occurrences {
    entries: Vec<(&'static str, Unit, Vec<Value>)>,
}

impl Occurrences {
    pub fn push(&mut self, name: &'static str, value: impl Into<Value>, unit: Unit) {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _, _)| *n == name) {
            Some((_, _, values)) => values.push(value),
            None => self.entries.push((name, unit, vec![value])),
        }
    }

    pub fn count(&self, name: &str) -> usize {
        self.entries
            .iter()
            .find(|(n, _, _)| *n == name)
            .map_or(0, |(_, _, values)| values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge every field and wrap it with its unit.
    pub fn into_record(self, fields: FieldFormatter) -> Record {
        let mut record = Record::new();
        for (name, unit, values) in self.entries {
            if let Some(value) = merge_occurrences(values) {
                record.insert(name, fields.value_unit(value, unit));
            }
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_counts() {
        assert_eq!(merge_occurrences(vec![]), None);
        assert_eq!(merge_occurrences(vec![Value::Float(12.3)]), Some(Value::Float(12.3)));
        assert_eq!(
            merge_occurrences(vec![Value::Float(12.3), Value::Float(45.6)]),
            Some(Value::List(vec![Value::Float(12.3), Value::Float(45.6)]))
        );
    }

    #[test]
    fn test_occurrences_keep_first_position() {
        let mut out = Occurrences::default();
        out.push("externalTemperature2", 12.3, Unit::DegreeCelsius);
        out.push("humidity", 40u8, Unit::Percent);
        out.push("externalTemperature2", 45.6, Unit::DegreeCelsius);
        assert_eq!(out.count("externalTemperature2"), 2);
        assert_eq!(out.count("temperature"), 0);

        let record = out.into_record(FieldFormatter::new(true));
        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            vec!["externalTemperature2", "humidity"]
        );
        assert_eq!(
            record.get("externalTemperature2"),
            Some(&Value::List(vec![
                Value::Text("12.3 °C".into()),
                Value::Text("45.6 °C".into()),
            ]))
        );
    }

    #[test]
    fn test_shapes() {
        let mut data = Record::new();
        data.insert("packet_type", "status_packet");
        let errors = vec![DecodeIssue::InvalidDaliAddress(0x01)];

        let nested = DecodeResult::new(data.clone(), errors.clone(), OutputShape::Nested);
        let json = serde_json::to_string(&nested).unwrap();
        assert_eq!(
            json,
            r#"{"data":{"packet_type":"status_packet"},"errors":["Invalid DALI address 0x01"]}"#
        );

        let flat = DecodeResult::new(data, errors, OutputShape::Flat);
        let json = serde_json::to_string(&flat).unwrap();
        assert_eq!(
            json,
            r#"{"packet_type":"status_packet","errors":["Invalid DALI address 0x01"]}"#
        );
    }

    #[test]
    fn test_empty_errors_always_present() {
        let result = DecodeResult::new(Record::new(), vec![], OutputShape::Flat);
        assert_eq!(serde_json::to_string(&result).unwrap(), r#"{"errors":[]}"#);
        assert!(!result.has_errors());
    }
}
