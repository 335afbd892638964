use crate::error::{BatchUpdateError, Result};
use crate::row::TableMapping;
use async_trait::async_trait;
use std::collections::HashMap;

/// Database adapter consumed by the batch update engine
///
/// Only [`OrmEngine::exec`] talks to a database. The metadata lookups default
/// to the row's own [`TableMapping`] declarations; adapters backed by a schema
/// registry can override them.
#[async_trait]
pub trait OrmEngine: Send + Sync {
    /// Execute one statement and return the number of affected rows
    async fn exec(&self, sql: &str) -> Result<u64>;

    /// Primary key column of the sample row's table
    fn primary_key<R: TableMapping + ?Sized>(&self, sample: &R) -> Result<String> {
        sample
            .primary_key()
            .filter(|pk| !pk.is_empty())
            .ok_or_else(|| BatchUpdateError::UnknownPrimaryKey {
                type_name: std::any::type_name::<R>().to_string(),
            })
    }

    /// Table the sample row maps to, empty when undeclared
    fn table_name<R: TableMapping + ?Sized>(&self, sample: &R) -> String {
        sample.table_name().unwrap_or_default()
    }

    /// Every mapped column of the sample row
    fn columns<R: TableMapping + ?Sized>(&self, sample: &R) -> Vec<String> {
        sample.columns()
    }

    /// SQL types of `columns` in `table`, keyed by column name
    ///
    /// Each `case` expression whose column has an entry is cast to that type,
    /// for databases that do not coerce quoted literals on assignment. Looked
    /// up once per update; the default declares no types.
    async fn column_types(&self, _table: &str, _columns: &[String]) -> Result<HashMap<String, String>> {
        Ok(HashMap::new())
    }
}

#[async_trait]
impl<E: OrmEngine> OrmEngine for &E {
    async fn exec(&self, sql: &str) -> Result<u64> {
        (**self).exec(sql).await
    }

    fn primary_key<R: TableMapping + ?Sized>(&self, sample: &R) -> Result<String> {
        (**self).primary_key(sample)
    }

    fn table_name<R: TableMapping + ?Sized>(&self, sample: &R) -> String {
        (**self).table_name(sample)
    }

    fn columns<R: TableMapping + ?Sized>(&self, sample: &R) -> Vec<String> {
        (**self).columns(sample)
    }

    async fn column_types(&self, table: &str, columns: &[String]) -> Result<HashMap<String, String>> {
        (**self).column_types(table, columns).await
    }
}
