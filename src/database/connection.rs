use crate::constants::{env, DEFAULT_DATABASE_URL};
use sqlx::{PgPool, Row};

pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Connect using `DATABASE_URL`, falling back to the development database
    pub async fn new() -> Result<Self, sqlx::Error> {
        let database_url =
            std::env::var(env::DATABASE_URL).unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        Self::connect(&database_url).await
    }

    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPool::connect(database_url).await?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 as health")
            .fetch_one(&self.pool)
            .await?;

        let health: i32 = row.get("health");
        Ok(health == 1)
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
