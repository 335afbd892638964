use super::{DatabaseConnection, OrmEngine};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::debug;

/// Declared type of each named column, rendered by `format_type` so that it
/// can be pasted after `::` (`integer`, `numeric(10,2)`, `character varying(20)`)
const COLUMN_TYPES_SQL: &str = "SELECT a.attname::text, format_type(a.atttypid, a.atttypmod) \
     FROM pg_attribute a \
     WHERE a.attrelid = $1::regclass AND a.attnum > 0 AND NOT a.attisdropped \
     AND a.attname::text = ANY($2)";

/// [`OrmEngine`] executing statements on a PostgreSQL pool through sqlx
///
/// Each statement runs on its own pooled connection and commits on its own;
/// there is no transaction spanning the chunks of one update.
///
/// PostgreSQL types a `case` of quoted literals as `text` and refuses to assign
/// it to non-text columns, so [`OrmEngine::column_types`] reads the catalog and
/// every `case` is cast to its column's declared type.
#[derive(Debug, Clone)]
pub struct PgOrmEngine {
    pool: PgPool,
}

impl PgOrmEngine {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl From<&DatabaseConnection> for PgOrmEngine {
    fn from(connection: &DatabaseConnection) -> Self {
        Self::new(connection.pool().clone())
    }
}

#[async_trait]
impl OrmEngine for PgOrmEngine {
    async fn exec(&self, sql: &str) -> Result<u64> {
        let result = sqlx::query(sql).execute(&self.pool).await?;
        debug!(rows_affected = result.rows_affected(), "Batch statement executed");
        Ok(result.rows_affected())
    }

    async fn column_types(&self, table: &str, columns: &[String]) -> Result<HashMap<String, String>> {
        let types: Vec<(String, String)> = sqlx::query_as(COLUMN_TYPES_SQL)
            .bind(table)
            .bind(columns)
            .fetch_all(&self.pool)
            .await?;
        debug!(table = %table, resolved = types.len(), "Column types resolved");
        Ok(types.into_iter().collect())
    }
}
