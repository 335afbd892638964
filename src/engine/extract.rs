//! Row value extraction into per-chunk value maps.

use crate::error::{BatchUpdateError, Result};
use crate::query_builder::{RowValues, ValueMap};
use crate::row::{FieldAccessor, FieldValue, NameMapping};
use tracing::warn;

/// Look up a column on a row through the naming convention
pub fn column_value<R: FieldAccessor + ?Sized>(
    row: &R,
    column: &str,
    mapping: NameMapping,
) -> Result<FieldValue> {
    let member = mapping.member_name(column);
    row.field_value(&member)
        .ok_or_else(|| BatchUpdateError::missing_field(column, member))
}

/// Integer primary key of a row
pub fn primary_key_value<R: FieldAccessor + ?Sized>(
    row: &R,
    primary_key: &str,
    mapping: NameMapping,
) -> Result<i64> {
    let value = column_value(row, primary_key, mapping)?;
    value
        .as_primary_key()
        .ok_or_else(|| BatchUpdateError::NonIntegerPrimaryKey {
            column: primary_key.to_string(),
            value: value.to_string(),
        })
}

/// Build the value map of one chunk
///
/// `first_index` is the position of `chunk[0]` in the full row collection and
/// only feeds error reporting. Every row must be a record with every column
/// present; the first failure aborts extraction.
pub fn extract_value_map<R: FieldAccessor>(
    chunk: &[R],
    first_index: usize,
    primary_key: &str,
    columns: &[String],
    mapping: NameMapping,
) -> Result<ValueMap> {
    let mut values = ValueMap::with_capacity(chunk.len());

    for (offset, row) in chunk.iter().enumerate() {
        if !row.is_record() {
            return Err(BatchUpdateError::NotARecord {
                index: first_index + offset,
            });
        }

        let pk_value = primary_key_value(row, primary_key, mapping)?;

        let mut row_values = RowValues::with_capacity(columns.len());
        for column in columns {
            row_values.insert(column.clone(), column_value(row, column, mapping)?);
        }

        if values.insert(pk_value, row_values).is_some() {
            warn!(
                primary_key = %primary_key,
                pk_value = pk_value,
                row_index = first_index + offset,
                "Duplicate primary key in batch; later row replaces earlier values"
            );
        }
    }

    Ok(values)
}
