//! # Batch Update Error Types
//!
//! Structured error handling for batch updates using thiserror. Every failure
//! aborts the remaining chunks of an operation; [`UpdateFailure`] carries the
//! rows already updated by earlier chunks alongside the cause.

use thiserror::Error;

/// Errors raised while resolving, synthesizing or executing a batch update
#[derive(Error, Debug)]
pub enum BatchUpdateError {
    #[error("no rows to update")]
    NoRows,

    #[error("primary key is not set")]
    MissingPrimaryKey,

    #[error("table name is not set")]
    MissingTableName,

    #[error("no columns to update")]
    NoColumns,

    #[error("primary key could not be determined for {type_name}")]
    UnknownPrimaryKey { type_name: String },

    #[error("row {index} is not a structured record")]
    NotARecord { index: usize },

    #[error("row has no member {member} for column {column}")]
    MissingField { column: String, member: String },

    #[error("primary key {column} must be an integer, got {value}")]
    NonIntegerPrimaryKey { column: String, value: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Adapter error: {operation}: {message}")]
    Adapter { operation: String, message: String },

    #[error("Runtime fault during batch update: {message}")]
    Fault { message: String },
}

impl BatchUpdateError {
    /// Create an adapter error for engines that do not speak sqlx
    pub fn adapter(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Adapter {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(column: impl Into<String>, member: impl Into<String>) -> Self {
        Self::MissingField {
            column: column.into(),
            member: member.into(),
        }
    }

    /// Create a runtime fault error
    pub fn fault(message: impl Into<String>) -> Self {
        Self::Fault {
            message: message.into(),
        }
    }

    /// True for errors caused by incomplete engine configuration
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::NoRows
                | Self::MissingPrimaryKey
                | Self::MissingTableName
                | Self::NoColumns
                | Self::UnknownPrimaryKey { .. }
        )
    }

    /// True for errors caused by the shape of a row
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            Self::NotARecord { .. } | Self::MissingField { .. } | Self::NonIntegerPrimaryKey { .. }
        )
    }
}

/// A failed update together with the rows that were updated before it stopped
#[derive(Error, Debug)]
#[error("batch update stopped after {affected} affected rows: {source}")]
pub struct UpdateFailure {
    /// Rows affected by chunks that executed before the failure
    pub affected: u64,
    #[source]
    pub source: BatchUpdateError,
}

impl UpdateFailure {
    pub fn new(affected: u64, source: BatchUpdateError) -> Self {
        Self { affected, source }
    }
}

pub type Result<T> = std::result::Result<T, BatchUpdateError>;
