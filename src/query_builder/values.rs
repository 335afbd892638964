use crate::row::FieldValue;
use serde::{Deserialize, Serialize};

/// How values are written into the generated SQL literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueInterpolation {
    /// Single quotes inside values are doubled
    #[default]
    Escaped,
    /// Values are copied between quotes untouched; unsafe with untrusted input
    Raw,
}

/// Format a field value as a quoted SQL literal for a `then` branch
pub fn format_value(value: &FieldValue, interpolation: ValueInterpolation) -> String {
    if value.is_null() {
        return "NULL".to_string();
    }

    let text = value.to_string();
    match interpolation {
        ValueInterpolation::Escaped => format!("'{}'", text.replace('\'', "''")),
        ValueInterpolation::Raw => format!("'{text}'"),
    }
}
