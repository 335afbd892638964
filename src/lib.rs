#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Batch Update Engine
//!
//! Folds per-row UPDATEs into one statement per chunk of rows:
//!
//! ```sql
//! update t set count = case id when 1 then '5' when 2 then '7' end where id in (1,2)
//! ```
//!
//! one round-trip instead of one per row.
//!
//! ## Module Organization
//!
//! - [`engine`] - the [`BatchUpdateEngine`] orchestrator
//! - [`batch`] - chunking of the row collection
//! - [`query_builder`] - `CASE WHEN` statement synthesis and value quoting
//! - [`row`] - the [`FieldAccessor`] / [`TableMapping`] row capabilities
//! - [`database`] - the [`OrmEngine`] adapter trait and its sqlx implementation
//! - [`config`] - [`BatchOptions`], environment and file loading
//! - [`error`] - structured error handling
//! - [`logging`] - tracing subscriber setup and structured log helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use batch_update_engine::database::{DatabaseConnection, PgOrmEngine};
//! use batch_update_engine::row::{FieldAccessor, FieldValue, TableMapping};
//! use batch_update_engine::{BatchOption, BatchUpdateEngine};
//!
//! struct StuTb {
//!     id: i64,
//!     user_count: i32,
//! }
//!
//! impl FieldAccessor for StuTb {
//!     fn field_value(&self, member: &str) -> Option<FieldValue> {
//!         match member {
//!             "Id" => Some(self.id.into()),
//!             "UserCount" => Some(self.user_count.into()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! impl TableMapping for StuTb {
//!     fn table_name(&self) -> Option<String> {
//!         Some("stu_tb".to_string())
//!     }
//!
//!     fn primary_key(&self) -> Option<String> {
//!         Some("id".to_string())
//!     }
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = DatabaseConnection::new().await?;
//! let mut engine = BatchUpdateEngine::new(PgOrmEngine::from(&db));
//!
//! let rows = vec![StuTb { id: 4920, user_count: 106 }, StuTb { id: 4921, user_count: 10 }];
//! let affected = engine
//!     .set_opt([BatchOption::ShowLog(true)])
//!     .cols(["user_count"])
//!     .update(&rows)
//!     .await?;
//! println!("updated {affected} rows");
//! # Ok(())
//! # }
//! ```
//!
//! ## Value Quoting
//!
//! Values are written as quoted SQL literals with single quotes doubled. The
//! unescaped behavior is available through `BatchOption::RawInterpolation`
//! for trusted data only.

pub mod batch;
pub mod config;
pub mod constants;
pub mod database;
pub mod engine;
pub mod error;
pub mod logging;
pub mod query_builder;
pub mod row;

pub use config::{BatchOption, BatchOptions};
pub use constants::DEFAULT_MAX_UPDATE_COUNT;
pub use database::{OrmEngine, PgOrmEngine};
pub use engine::BatchUpdateEngine;
pub use error::{BatchUpdateError, Result, UpdateFailure};
pub use row::{FieldAccessor, FieldValue, NameMapping, TableMapping};
