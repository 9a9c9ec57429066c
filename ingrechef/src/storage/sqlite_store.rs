//! SQLite-backed key-value store
//!
//! One row per key in `kv_store`. Each `set` is a single upsert statement,
//! so writes are atomic per key and nothing spans keys.

use super::KeyValueStore;
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        tracing::debug!(key, found = value.is_some(), "kv get");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        tracing::debug!(key, bytes = value.len(), "kv set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_memory_pool;

    async fn create_test_store() -> SqliteStore {
        SqliteStore::new(create_memory_pool().await.unwrap())
    }

    #[tokio::test]
    async fn test_get_and_set() {
        let store = create_test_store().await;

        assert_eq!(store.get("theme").await.unwrap(), None);

        store.set("theme", "dark").await.unwrap();
        assert_eq!(store.get("theme").await.unwrap(), Some("dark".to_string()));

        store.set("theme", "light").await.unwrap();
        assert_eq!(store.get("theme").await.unwrap(), Some("light".to_string()));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = create_test_store().await;

        store.set("a", "1").await.unwrap();
        store.set("b", "2").await.unwrap();

        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_closed_pool_errors() {
        let pool = create_memory_pool().await.unwrap();
        let store = SqliteStore::new(pool.clone());
        pool.close().await;

        assert!(store.set("a", "1").await.is_err());
        assert!(store.get("a").await.is_err());
    }
}
