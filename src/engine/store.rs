use anyhow::Result;
use async_trait::async_trait;

/// The transactional storage system being migrated.
///
/// Every state change the orchestrator makes runs inside one transaction
/// obtained here and is either committed or rolled back as a whole.
#[async_trait]
pub trait Store: Send + Sync {
    type Tx: Send + Sync + 'static;

    async fn begin(&self) -> Result<Self::Tx>;

    async fn commit(&self, tx: Self::Tx) -> Result<()>;

    async fn rollback(&self, tx: Self::Tx) -> Result<()>;
}
