//! # Batch Update Engine
//!
//! Folds per-row updates into one `CASE WHEN` statement per chunk and executes
//! the statements in order through an [`OrmEngine`].
//!
//! ## Lifecycle
//!
//! ```text
//! idle ──update()──▶ batching ──(rows exhausted | first error | panic)──▶ idle
//!                     │  resolve pk/table/cols and column types (first chunk only)
//!                     │  extract value map
//!                     │  synthesize statement
//!                     └─ execute, accumulate affected rows
//! ```
//!
//! Explicitly set primary key, table name and columns apply to the next
//! [`BatchUpdateEngine::update`] only; the engine forgets them once the call
//! returns, successful or not, so one engine can serve differently shaped
//! updates one after another. Chunks that executed before a failure stay
//! committed and their affected rows are reported in [`UpdateFailure`].
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use batch_update_engine::database::OrmEngine;
//! use batch_update_engine::BatchUpdateEngine;
//! use serde_json::json;
//! use std::sync::Mutex;
//!
//! #[derive(Default)]
//! struct Recorder(Mutex<Vec<String>>);
//!
//! #[async_trait]
//! impl OrmEngine for Recorder {
//!     async fn exec(&self, sql: &str) -> batch_update_engine::Result<u64> {
//!         self.0.lock().unwrap().push(sql.to_string());
//!         Ok(2)
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let rows = vec![json!({"Id": 1, "Count": 5}), json!({"Id": 2, "Count": 7})];
//! let mut engine = BatchUpdateEngine::new(Recorder::default());
//! let affected = engine.table("t").pk("id").cols(["count"]).update(&rows).await.unwrap();
//!
//! assert_eq!(affected, 2);
//! assert_eq!(
//!     engine.orm().0.lock().unwrap()[0],
//!     "update t set count = case id when 1 then '5' when 2 then '7' end where id in (1,2)"
//! );
//! # });
//! ```

pub mod extract;

use crate::batch::RowBatcher;
use crate::config::{normalize_max_count, BatchOption, BatchOptions};
use crate::database::OrmEngine;
use crate::error::{BatchUpdateError, Result, UpdateFailure};
use crate::logging::{log_batch_operation, log_error};
use crate::query_builder::CaseUpdateBuilder;
use crate::row::{FieldAccessor, TableMapping};
use futures::FutureExt;
use std::any::Any;
use std::backtrace::Backtrace;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info};

pub use extract::{column_value, extract_value_map, primary_key_value};

/// Batches row updates into `CASE WHEN` statements
pub struct BatchUpdateEngine<E> {
    eng: E,
    options: BatchOptions,
    cols: Vec<String>,
    pk: String,
    table_name: String,
    column_types: Option<HashMap<String, String>>,
}

impl<E: OrmEngine> BatchUpdateEngine<E> {
    pub fn new(eng: E) -> Self {
        Self::with_options(eng, BatchOptions::default())
    }

    pub fn with_options(eng: E, mut options: BatchOptions) -> Self {
        if options.once_max_count == 0 {
            options.once_max_count = normalize_max_count(0);
        }
        Self {
            eng,
            options,
            cols: Vec::new(),
            pk: String::new(),
            table_name: String::new(),
            column_types: None,
        }
    }

    /// Apply option overrides in order
    pub fn set_opt<I: IntoIterator<Item = BatchOption>>(&mut self, options: I) -> &mut Self {
        self.options.apply_all(options);
        self
    }

    /// Columns to update, replacing any previously set
    pub fn cols<I, S>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cols = cols.into_iter().map(Into::into).collect();
        self
    }

    pub fn table(&mut self, table_name: impl Into<String>) -> &mut Self {
        self.table_name = table_name.into();
        self
    }

    /// Primary key column; when unset it is taken from the adapter
    pub fn pk(&mut self, primary_key: impl Into<String>) -> &mut Self {
        self.pk = primary_key.into();
        self
    }

    /// Non-positive values select the default of 500
    pub fn set_max_update_count(&mut self, max_count: i64) -> &mut Self {
        self.options.once_max_count = normalize_max_count(max_count);
        self
    }

    pub fn max_update_count(&self) -> usize {
        self.options.once_max_count
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    pub fn orm(&self) -> &E {
        &self.eng
    }

    pub fn columns(&self) -> &[String] {
        &self.cols
    }

    pub fn primary_key(&self) -> &str {
        &self.pk
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Update `rows` chunk by chunk, returning the total affected rows
    ///
    /// Stops at the first error. The error carries the rows affected by the
    /// chunks that ran before it.
    pub async fn update<R>(&mut self, rows: &[R]) -> std::result::Result<u64, UpdateFailure>
    where
        R: FieldAccessor + TableMapping + Sync,
    {
        let mut affected = 0u64;
        let mut batcher = RowBatcher::new(rows);

        let outcome = AssertUnwindSafe(self.run_batches(&mut batcher, &mut affected))
            .catch_unwind()
            .await;

        batcher.clear();
        self.clear();

        match outcome {
            Ok(Ok(())) => Ok(affected),
            Ok(Err(err)) => Err(UpdateFailure::new(affected, err)),
            Err(payload) => Err(UpdateFailure::new(affected, fault_from_panic(payload))),
        }
    }

    /// Resolve and synthesize every chunk's statement without executing it
    ///
    /// The preview does not consult [`OrmEngine::column_types`], so statements
    /// are rendered without column casts.
    pub fn build_statements<R>(&mut self, rows: &[R]) -> Result<Vec<String>>
    where
        R: FieldAccessor + TableMapping,
    {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> Result<Vec<String>> {
            let mut batcher = RowBatcher::new(rows);
            if batcher.is_exhausted() {
                return Err(BatchUpdateError::NoRows);
            }
            let mut statements = Vec::new();
            while let Some(chunk) = batcher.next_chunk(self.options.once_max_count) {
                let first_index = batcher.offset() - chunk.len();
                if let Some(sample) = chunk.first() {
                    self.resolve(sample)?;
                }
                statements.push(self.chunk_sql(chunk, first_index)?);
            }
            Ok(statements)
        }));

        self.clear();

        outcome.unwrap_or_else(|payload| Err(fault_from_panic(payload)))
    }

    async fn run_batches<R>(
        &mut self,
        batcher: &mut RowBatcher<'_, R>,
        affected: &mut u64,
    ) -> Result<()>
    where
        R: FieldAccessor + TableMapping + Sync,
    {
        if batcher.is_exhausted() {
            return Err(BatchUpdateError::NoRows);
        }

        let max_count = self.options.once_max_count;
        let mut chunk_index = 0usize;

        while let Some(chunk) = batcher.next_chunk(max_count) {
            let first_index = batcher.offset() - chunk.len();

            let sql = match self.statement_for(chunk, first_index).await {
                Ok(sql) => sql,
                Err(err) => {
                    if self.options.show_log {
                        log_error("batch_update_engine", "build_sql", &err.to_string(), None);
                    }
                    return Err(err);
                }
            };

            debug!(
                table = %self.table_name,
                chunk_index = chunk_index,
                rows = chunk.len(),
                "Executing batch update chunk"
            );

            match self.eng.exec(&sql).await {
                Ok(rows_affected) => {
                    *affected += rows_affected;
                    if self.options.show_log {
                        log_batch_operation(
                            "update",
                            Some(self.table_name.as_str()),
                            chunk_index,
                            chunk.len(),
                            "success",
                            Some(rows_affected),
                            None,
                        );
                    }
                }
                Err(err) => {
                    if self.options.show_log {
                        log_error("batch_update_engine", "exec", &err.to_string(), Some(&sql));
                    }
                    return Err(err);
                }
            }

            chunk_index += 1;
        }

        Ok(())
    }

    /// Resolve the operation's metadata on first use, then synthesize
    async fn statement_for<R>(&mut self, chunk: &[R], first_index: usize) -> Result<String>
    where
        R: FieldAccessor + TableMapping + Sync,
    {
        let sample = chunk.first().ok_or(BatchUpdateError::NoRows)?;
        self.resolve(sample)?;

        if self.column_types.is_none() && !self.table_name.is_empty() {
            let types = self.eng.column_types(&self.table_name, &self.cols).await?;
            debug!(table = %self.table_name, typed_columns = types.len(), "Column types resolved");
            self.column_types = Some(types);
        }

        self.chunk_sql(chunk, first_index)
    }

    fn chunk_sql<R>(&self, chunk: &[R], first_index: usize) -> Result<String>
    where
        R: FieldAccessor + TableMapping,
    {
        let values = extract_value_map(
            chunk,
            first_index,
            &self.pk,
            &self.cols,
            self.options.name_mapping,
        )?;

        let mut builder = CaseUpdateBuilder::new(&self.table_name)
            .primary_key(&self.pk)
            .columns(&self.cols)
            .interpolation(self.options.interpolation());
        if let Some(types) = &self.column_types {
            builder = builder.column_types(types);
        }
        let sql = builder.build_sql(&values)?;

        if self.options.show_log {
            info!(sql = %sql, "Batch update statement");
        }

        Ok(sql)
    }

    /// Fill in whatever the caller left unset from the sample row
    ///
    /// The column check runs first so that a missing column list fails before
    /// the adapter is consulted. Resolved values stay cached until
    /// [`Self::clear`].
    fn resolve<R>(&mut self, sample: &R) -> Result<()>
    where
        R: TableMapping + ?Sized,
    {
        if self.cols.is_empty() && !self.options.auto_update_all_cols {
            return Err(BatchUpdateError::NoColumns);
        }

        if self.pk.is_empty() {
            self.pk = self.eng.primary_key(sample)?;
        }

        if self.table_name.is_empty() {
            self.table_name = self.eng.table_name(sample);
        }

        if self.cols.is_empty() {
            self.cols = self.eng.columns(sample);
            if self.cols.is_empty() {
                return Err(BatchUpdateError::NoColumns);
            }
        }

        Ok(())
    }

    fn clear(&mut self) {
        self.pk.clear();
        self.table_name.clear();
        self.cols.clear();
        self.column_types = None;
    }
}

fn fault_from_panic(payload: Box<dyn Any + Send>) -> BatchUpdateError {
    let message = if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    };

    let backtrace = Backtrace::force_capture();
    log_error(
        "batch_update_engine",
        "update",
        &message,
        Some(&format!("panic caught\n{backtrace}")),
    );
    BatchUpdateError::fault(message)
}
