use crate::row::FieldValue;
use indexmap::IndexMap;

/// Column values of one row, in column order
pub type RowValues = IndexMap<String, FieldValue>;

/// Per-chunk map from primary key value to that row's column values
///
/// Keys keep the order in which rows were first seen. Inserting a key that is
/// already present replaces the earlier row's values (last write wins) and
/// keeps the key at its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueMap {
    rows: IndexMap<i64, RowValues>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert a row, returning the values it replaced on a key collision
    pub fn insert(&mut self, pk_value: i64, values: RowValues) -> Option<RowValues> {
        self.rows.insert(pk_value, values)
    }

    pub fn get(&self, pk_value: i64) -> Option<&RowValues> {
        self.rows.get(&pk_value)
    }

    pub fn pk_values(&self) -> impl Iterator<Item = i64> + '_ {
        self.rows.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &RowValues)> {
        self.rows.iter().map(|(pk, values)| (*pk, values))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
