//! Test database utilities
//!
//! Each test gets an isolated in-memory SQLite database with migrations applied.

use restapi_rs::config::DatabaseConfig;
use restapi_rs::storage::database::{Database, Records};
use std::sync::Arc;

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<Database>,
}

impl TestDatabase {
    /// Create a new in-memory test database using SeaORM
    pub async fn new() -> Self {
        let db = Database::new(&DatabaseConfig::in_memory())
            .await
            .expect("Failed to create in-memory test database");

        Self {
            inner: Arc::new(db),
        }
    }

    /// Get reference to the underlying database
    pub fn db(&self) -> &Database {
        &self.inner
    }

    /// Get Arc to the underlying database
    pub fn db_arc(&self) -> Arc<Database> {
        Arc::clone(&self.inner)
    }
}

/// Number of stored records in `collection`
pub async fn count_records(db: &Database, collection: &str) -> u64 {
    Records::new(db.connection())
        .count(collection)
        .await
        .expect("Failed to count records")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_creation() {
        let db = TestDatabase::new().await;
        assert!(db.db().health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_databases_are_isolated() {
        let first = TestDatabase::new().await;
        let second = TestDatabase::new().await;

        let records = Records::new(first.db().connection());
        records
            .insert("orgs", "k1", &serde_json::Map::new(), None)
            .await
            .unwrap();

        assert_eq!(count_records(first.db(), "orgs").await, 1);
        assert_eq!(count_records(second.db(), "orgs").await, 0);
    }
}
