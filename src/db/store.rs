use anyhow::{Context, Result};
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::engine::Store;

pub struct SeaStore {
    db: DatabaseConnection,
}

impl SeaStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for SeaStore {
    type Tx = DatabaseTransaction;

    async fn begin(&self) -> Result<DatabaseTransaction> {
        self.db
            .begin()
            .await
            .context("Failed to begin transaction")
    }

    async fn commit(&self, tx: DatabaseTransaction) -> Result<()> {
        tx.commit().await.context("Failed to commit transaction")
    }

    async fn rollback(&self, tx: DatabaseTransaction) -> Result<()> {
        tx.rollback()
            .await
            .context("Failed to roll back transaction")
    }
}
