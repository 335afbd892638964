//! Dynamic rows backed by `serde_json`.
//!
//! A JSON object is a record whose keys are member names. Any other JSON
//! value is a scalar and is rejected by the engine. Table metadata may be
//! declared with the reserved keys `__table`, `__pk` and `__columns`.

use super::{FieldAccessor, FieldValue, TableMapping};
use serde_json::{Map, Value};

const TABLE_KEY: &str = "__table";
const PRIMARY_KEY_KEY: &str = "__pk";
const COLUMNS_KEY: &str = "__columns";

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::UInt(u)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => FieldValue::Text(s.clone()),
            other => FieldValue::Text(other.to_string()),
        }
    }
}

impl FieldAccessor for Map<String, Value> {
    fn field_value(&self, member: &str) -> Option<FieldValue> {
        self.get(member).map(FieldValue::from)
    }
}

impl TableMapping for Map<String, Value> {
    fn table_name(&self) -> Option<String> {
        self.get(TABLE_KEY).and_then(Value::as_str).map(str::to_string)
    }

    fn primary_key(&self) -> Option<String> {
        self.get(PRIMARY_KEY_KEY)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn columns(&self) -> Vec<String> {
        match self.get(COLUMNS_KEY).and_then(Value::as_array) {
            Some(declared) => declared
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            None => self
                .keys()
                .filter(|key| !key.starts_with("__"))
                .cloned()
                .collect(),
        }
    }
}

impl FieldAccessor for Value {
    fn field_value(&self, member: &str) -> Option<FieldValue> {
        self.as_object()?.field_value(member)
    }

    fn is_record(&self) -> bool {
        self.is_object()
    }
}

impl TableMapping for Value {
    fn table_name(&self) -> Option<String> {
        self.as_object()?.table_name()
    }

    fn primary_key(&self) -> Option<String> {
        self.as_object()?.primary_key()
    }

    fn columns(&self) -> Vec<String> {
        self.as_object().map(TableMapping::columns).unwrap_or_default()
    }
}
