//! # Query Builder System
//!
//! SQL generation for batched updates.
//!
//! ## Key Components
//!
//! - [`case_update`] - `UPDATE ... SET col = CASE pk WHEN ... END` synthesis
//! - [`value_map`] - per-chunk primary key to column value mapping
//! - [`values`] - literal formatting and quote escaping
//!
//! ## Example Usage
//!
//! ```rust
//! use batch_update_engine::query_builder::{CaseUpdateBuilder, ValueMap};
//! use batch_update_engine::row::FieldValue;
//! use indexmap::IndexMap;
//!
//! let mut values = ValueMap::new();
//! values.insert(1, IndexMap::from([("count".to_string(), FieldValue::Int(5))]));
//! values.insert(2, IndexMap::from([("count".to_string(), FieldValue::Int(7))]));
//!
//! let sql = CaseUpdateBuilder::new("t")
//!     .primary_key("id")
//!     .columns(&["count"])
//!     .build_sql(&values)?;
//! assert_eq!(
//!     sql,
//!     "update t set count = case id when 1 then '5' when 2 then '7' end where id in (1,2)"
//! );
//! # Ok::<(), batch_update_engine::BatchUpdateError>(())
//! ```
//!
//! ## Quoting
//!
//! Values are always written as quoted literals. Single quotes are doubled
//! unless [`ValueInterpolation::Raw`] is selected, which copies values through
//! untouched and must only be used with trusted data.

pub mod case_update;
pub mod value_map;
pub mod values;

pub use case_update::CaseUpdateBuilder;
pub use value_map::{RowValues, ValueMap};
pub use values::{format_value, ValueInterpolation};
