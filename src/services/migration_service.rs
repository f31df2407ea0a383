use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, DatabaseTransaction};

use crate::{
    config::Settings,
    db::{SeaStore, init_db},
    engine::{Ledger, Orchestrator, RunOutcome, UnitLoader},
    entities::LedgerEntryModel,
    errors::MigrateError,
    loader::SqlScriptLoader,
    repo::LedgerRepository,
    types::Action,
};

/// Runs SQL-script migrations against the configured database.
pub struct MigrationService {
    orchestrator: Orchestrator<SeaStore>,
    ledger: Arc<LedgerRepository>,
}

impl MigrationService {
    pub async fn new(settings: &Settings) -> Result<Self> {
        let db = init_db(settings)
            .await
            .context("Failed to initialize database for MigrationService")?;
        Self::from_connection(db, settings).await
    }

    pub async fn from_connection(db: DatabaseConnection, settings: &Settings) -> Result<Self> {
        let ledger = Arc::new(
            LedgerRepository::init(db.clone())
                .await
                .context("Failed to initialize the migration ledger")?,
        );

        let shared_ledger: Arc<dyn Ledger<DatabaseTransaction>> = ledger.clone();
        let loader: Arc<dyn UnitLoader<DatabaseTransaction>> = Arc::new(SqlScriptLoader::new());
        let orchestrator = Orchestrator::new(
            Arc::new(SeaStore::new(db)),
            shared_ledger,
            loader,
            settings.migrations.suffix.clone(),
        );

        Ok(Self {
            orchestrator,
            ledger,
        })
    }

    pub fn get_ledger(&self) -> Arc<LedgerRepository> {
        self.ledger.clone()
    }

    pub async fn run(&self, action: Action, directory: &Path) -> Result<RunOutcome, MigrateError> {
        self.orchestrator.run(action, directory).await
    }

    /// Ledger entries, oldest first.
    pub async fn applied(&self) -> Result<Vec<LedgerEntryModel>> {
        self.ledger.get_all().await
    }
}
