use crate::core::batch::TransactionalResource;
use crate::utils::error::Result;
use async_trait::async_trait;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::debug;

use super::types::SeaOrmDatabase;

#[async_trait]
impl TransactionalResource for SeaOrmDatabase {
    type Transaction = DatabaseTransaction;

    async fn begin(&self) -> Result<DatabaseTransaction> {
        debug!("Beginning batch transaction");
        Ok(self.db.begin().await?)
    }

    async fn commit(&self, transaction: DatabaseTransaction) -> Result<()> {
        debug!("Committing batch transaction");
        Ok(transaction.commit().await?)
    }

    async fn rollback(&self, transaction: DatabaseTransaction) -> Result<()> {
        debug!("Rolling back batch transaction");
        Ok(transaction.rollback().await?)
    }
}
