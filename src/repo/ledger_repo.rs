use std::collections::BTreeSet;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, Schema,
};
use tracing::debug;

use crate::{
    engine::Ledger,
    entities::{LedgerEntriesEntity, LedgerEntryActiveModel, LedgerEntryColumn, LedgerEntryModel},
    errors::LedgerError,
};

/// The `migrations` table in the database being migrated.
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens the ledger, creating its table when missing.
    pub async fn init(db: DatabaseConnection) -> Result<Self> {
        let repo = Self::new(db);
        repo.ensure_table().await?;
        Ok(repo)
    }

    pub async fn ensure_table(&self) -> Result<()> {
        let backend = self.db.get_database_backend();
        let mut stmt = Schema::new(backend).create_table_from_entity(LedgerEntriesEntity);
        stmt.if_not_exists();

        self.db
            .execute(backend.build(&stmt))
            .await
            .context("Failed to create the migrations table")?;
        debug!("Migrations table is ready");
        Ok(())
    }

    pub fn get_db(&self) -> DatabaseConnection {
        self.db.clone()
    }

    /// All entries, oldest first.
    pub async fn get_all(&self) -> Result<Vec<LedgerEntryModel>> {
        LedgerEntriesEntity::find()
            .order_by_asc(LedgerEntryColumn::Seq)
            .all(&self.db)
            .await
            .context("Failed to read the migrations table")
    }
}

#[async_trait]
impl Ledger<DatabaseTransaction> for LedgerRepository {
    async fn applied_ids(&self) -> Result<BTreeSet<String>> {
        Ok(self.get_all().await?.into_iter().map(|m| m.id).collect())
    }

    async fn most_recent(&self) -> Result<Option<String>> {
        let entry = LedgerEntriesEntity::find()
            .order_by_desc(LedgerEntryColumn::Seq)
            .one(&self.db)
            .await
            .context("Failed to read the migrations table")?;
        Ok(entry.map(|m| m.id))
    }

    async fn record(&self, id: &str, tx: &DatabaseTransaction) -> Result<()> {
        LedgerEntryActiveModel::new(id)
            .insert(tx)
            .await
            .context(format!("Failed to insert ledger entry for '{}'", id))?;
        Ok(())
    }

    async fn erase(&self, id: &str, tx: &DatabaseTransaction) -> Result<()> {
        let res = LedgerEntriesEntity::delete_many()
            .filter(LedgerEntryColumn::Id.eq(id))
            .exec(tx)
            .await
            .context(format!("Failed to delete ledger entry for '{}'", id))?;

        if res.rows_affected == 0 {
            return Err(LedgerError::NotRecorded { id: id.to_string() }.into());
        }
        Ok(())
    }
}
