use std::collections::BTreeSet;

use anyhow::Result;
use async_trait::async_trait;

/// Durable record of applied migration ids, kept in the same storage system
/// as the schema it describes.
///
/// Writes take the caller's transaction so that a schema change and its
/// ledger entry commit or roll back together.
#[async_trait]
pub trait Ledger<Tx: Send + Sync>: Send + Sync {
    async fn applied_ids(&self) -> Result<BTreeSet<String>>;

    /// The id with the greatest ordering key, if any.
    async fn most_recent(&self) -> Result<Option<String>>;

    async fn record(&self, id: &str, tx: &Tx) -> Result<()>;

    /// Fails with [`crate::errors::LedgerError::NotRecorded`] when `id` has no
    /// entry.
    async fn erase(&self, id: &str, tx: &Tx) -> Result<()>;
}
