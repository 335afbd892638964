//! # Row Capabilities
//!
//! Rows handed to the batch update engine are read through two small traits
//! instead of runtime reflection:
//!
//! - [`FieldAccessor`] - look up a field value by member name
//! - [`TableMapping`] - optional declared table name, primary key and columns
//!
//! Typed structs implement both by hand (a `match` over member names is
//! enough), and `serde_json::Value` implements them for dynamic rows.
//!
//! ```rust
//! use batch_update_engine::row::{FieldAccessor, FieldValue, TableMapping};
//!
//! struct Account {
//!     id: i64,
//!     balance: i64,
//! }
//!
//! impl FieldAccessor for Account {
//!     fn field_value(&self, member: &str) -> Option<FieldValue> {
//!         match member {
//!             "Id" => Some(self.id.into()),
//!             "Balance" => Some(self.balance.into()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! impl TableMapping for Account {
//!     fn table_name(&self) -> Option<String> {
//!         Some("accounts".to_string())
//!     }
//! }
//!
//! let account = Account { id: 7, balance: 120 };
//! assert_eq!(account.field_value("Balance"), Some(FieldValue::Int(120)));
//! ```

pub mod json;
pub mod naming;

pub use naming::{to_camel_case, NameMapping};

use std::fmt;

/// A single column value extracted from a row
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Integer view used for primary keys; text and floats are rejected
    pub fn as_primary_key(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            FieldValue::UInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "NULL"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Int(i) => write!(f, "{i}"),
            FieldValue::UInt(u) => write!(f, "{u}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Text(s) => write!(f, "{s}"),
        }
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(value: $t) -> Self {
                FieldValue::Int(i64::from(value))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(value: $t) -> Self {
                FieldValue::UInt(u64::from(value))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Float(f64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Read access to a row's fields by member name
pub trait FieldAccessor {
    /// Value of the named member, `None` when the row has no such member
    fn field_value(&self, member: &str) -> Option<FieldValue>;

    /// Whether this row is a structured record; scalar rows are rejected
    fn is_record(&self) -> bool {
        true
    }
}

/// Table metadata a row type may declare for auto-detection
pub trait TableMapping {
    fn table_name(&self) -> Option<String> {
        None
    }

    fn primary_key(&self) -> Option<String> {
        None
    }

    /// Every mapped column, used when updating all columns
    fn columns(&self) -> Vec<String> {
        Vec::new()
    }
}

impl<T: FieldAccessor + ?Sized> FieldAccessor for &T {
    fn field_value(&self, member: &str) -> Option<FieldValue> {
        (**self).field_value(member)
    }

    fn is_record(&self) -> bool {
        (**self).is_record()
    }
}

impl<T: TableMapping + ?Sized> TableMapping for &T {
    fn table_name(&self) -> Option<String> {
        (**self).table_name()
    }

    fn primary_key(&self) -> Option<String> {
        (**self).primary_key()
    }

    fn columns(&self) -> Vec<String> {
        (**self).columns()
    }
}
