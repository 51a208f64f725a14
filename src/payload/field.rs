//! Output shaping for decoded fields.
//!
//! Every field leaves a decoder through one of five wrappers. In full mode the
//! wrapper is a small map; in compact mode it collapses to a bare value or a
//! `"<value> <unit>"` string.
//!
//! | wrapper              | full                         | compact                               |
//! |----------------------|------------------------------|---------------------------------------|
//! | `value`              | `{value}`                    | `value`                               |
//! | `value_raw`          | `{value, raw}`               | `value`                               |
//! | `value_unit`         | `{value, unit}`              | `"<value> <unit>"` or `null`          |
//! | `value_raw_unit`     | `{value, raw, unit}`         | `"<value> <unit>"` or `null`          |
//! | `value_unit_bounds`  | `{value, unit, min, max}`    | `{value: "<value> <unit>", min, max}` |
//!
//! In compact mode a list value (a repeated field, a pixel frame) becomes a
//! list of `"<value> <unit>"` strings.

use crate::payload::unit::Unit;
use crate::payload::value::{Record, Value};

/// Applies the caller's compact setting to decoded fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldFormatter {
    compact: bool,
}

impl FieldFormatter {
    pub fn new(compact: bool) -> Self {
        Self { compact }
    }

    pub fn is_compact(&self) -> bool {
        self.compact
    }

    pub fn value(&self, value: impl Into<Value>) -> Value {
        let value = value.into();
        if self.compact {
            return value;
        }
        let mut out = Record::new();
        out.insert("value", value);
        out.into()
    }

    pub fn value_raw(&self, value: impl Into<Value>, raw: impl Into<Value>) -> Value {
        let value = value.into();
        if self.compact {
            return value;
        }
        let mut out = Record::new();
        out.insert("value", value);
        out.insert("raw", raw);
        out.into()
    }

    pub fn value_unit(&self, value: impl Into<Value>, unit: Unit) -> Value {
        let value = value.into();
        if self.compact {
            return with_unit(value, unit);
        }
        let mut out = Record::new();
        out.insert("value", value);
        out.insert("unit", unit.as_str());
        out.into()
    }

    pub fn value_raw_unit(
        &self,
        value: impl Into<Value>,
        raw: impl Into<Value>,
        unit: Unit,
    ) -> Value {
        let value = value.into();
        if self.compact {
            return with_unit(value, unit);
        }
        let mut out = Record::new();
        out.insert("value", value);
        out.insert("raw", raw);
        out.insert("unit", unit.as_str());
        out.into()
    }

    /// `min`/`max` are emitted as plain numbers in both modes.
    pub fn value_unit_bounds(
        &self,
        value: impl Into<Value>,
        unit: Unit,
        min: i64,
        max: i64,
    ) -> Value {
        let value = value.into();
        let mut out = Record::new();
        if self.compact {
            out.insert("value", with_unit(value, unit));
        } else {
            out.insert("value", value);
            out.insert("unit", unit.as_str());
        }
        out.insert("min", min);
        out.insert("max", max);
        out.into()
    }
}

/// Lists keep their shape: each element gets its own unit suffix.
fn with_unit(value: Value, unit: Unit) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::List(items) => Value::List(
            items
                .into_iter()
                .map(|item| with_unit(item, unit))
                .collect(),
        ),
        value => Value::Text(format!("{value} {unit}")),
    }
}
