//! # Database Operations
//!
//! The adapter seam between the batch update engine and a database.
//!
//! ## Key Components
//!
//! - [`engine`] - the [`OrmEngine`] adapter trait
//! - [`postgres`] - sqlx/PostgreSQL implementation of the adapter
//! - [`connection`] - pool setup from `DATABASE_URL` with a health check
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use batch_update_engine::database::{DatabaseConnection, PgOrmEngine};
//! use batch_update_engine::BatchUpdateEngine;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = DatabaseConnection::new().await?;
//! let mut engine = BatchUpdateEngine::new(PgOrmEngine::from(&db));
//! # let rows: Vec<serde_json::Value> = Vec::new();
//! let affected = engine.table("stu_tb").pk("id").cols(["user_count"]).update(&rows).await?;
//! # let _ = affected;
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod engine;
pub mod postgres;

pub use connection::DatabaseConnection;
pub use engine::OrmEngine;
pub use postgres::PgOrmEngine;
