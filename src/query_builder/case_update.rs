use super::{format_value, ValueInterpolation, ValueMap};
use crate::error::{BatchUpdateError, Result};
use std::collections::HashMap;

/// Builds one `UPDATE ... SET col = CASE pk WHEN ... END` statement per chunk
///
/// Every row of the chunk contributes a `when` branch to every column, and the
/// statement is restricted to the chunk with `where <pk> in (...)`.
#[derive(Debug, Clone, Default)]
pub struct CaseUpdateBuilder {
    table: String,
    primary_key: String,
    columns: Vec<String>,
    interpolation: ValueInterpolation,
    column_types: HashMap<String, String>,
}

impl CaseUpdateBuilder {
    /// Create a builder for the given table
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            ..Self::default()
        }
    }

    /// Set the primary key column matched by every `case`
    pub fn primary_key(mut self, primary_key: &str) -> Self {
        self.primary_key = primary_key.to_string();
        self
    }

    /// Set the columns to update, in clause order
    pub fn columns<S: AsRef<str>>(mut self, columns: &[S]) -> Self {
        self.columns = columns.iter().map(|c| c.as_ref().to_string()).collect();
        self
    }

    pub fn interpolation(mut self, interpolation: ValueInterpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Cast each listed column's `case` expression to the given SQL type
    ///
    /// Columns without an entry keep the bare `case ... end` form.
    pub fn column_types(mut self, column_types: &HashMap<String, String>) -> Self {
        self.column_types = column_types.clone();
        self
    }

    /// Build the statement for one chunk's values
    pub fn build_sql(&self, values: &ValueMap) -> Result<String> {
        if self.primary_key.is_empty() {
            return Err(BatchUpdateError::MissingPrimaryKey);
        }
        if self.table.is_empty() {
            return Err(BatchUpdateError::MissingTableName);
        }
        if self.columns.is_empty() {
            return Err(BatchUpdateError::NoColumns);
        }
        if values.is_empty() {
            return Err(BatchUpdateError::NoRows);
        }

        let pk_list = values
            .pk_values()
            .map(|pk| pk.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let mut set_clauses = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            set_clauses.push(self.case_clause(column, values)?);
        }

        Ok(format!(
            "update {} set {} where {} in ({})",
            self.table,
            set_clauses.join(", "),
            self.primary_key,
            pk_list
        ))
    }

    fn case_clause(&self, column: &str, values: &ValueMap) -> Result<String> {
        let mut clause = format!("case {}", self.primary_key);
        for (pk, row) in values.iter() {
            let value = row
                .get(column)
                .ok_or_else(|| BatchUpdateError::missing_field(column, column))?;
            clause.push_str(&format!(
                " when {pk} then {}",
                format_value(value, self.interpolation)
            ));
        }
        clause.push_str(" end");
        Ok(match self.column_types.get(column) {
            Some(sql_type) => format!("{column} = ({clause})::{sql_type}"),
            None => format!("{column} = {clause}"),
        })
    }
}
