use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::errors::LoadError;

/// One direction of a migration unit, run against an open transaction.
#[async_trait]
pub trait Capability<Tx: Send + Sync>: Send + Sync {
    async fn invoke(&self, tx: &Tx) -> Result<()>;
}

/// Wraps a synchronous closure as a [`Capability`].
pub struct FnStep<F>(pub F);

#[async_trait]
impl<Tx, F> Capability<Tx> for FnStep<F>
where
    Tx: Send + Sync,
    F: Fn(&Tx) -> Result<()> + Send + Sync,
{
    async fn invoke(&self, tx: &Tx) -> Result<()> {
        (self.0)(tx)
    }
}

pub struct Capabilities<Tx: Send + Sync> {
    pub apply: Arc<dyn Capability<Tx>>,
    pub revert: Arc<dyn Capability<Tx>>,
}

impl<Tx: Send + Sync> Clone for Capabilities<Tx> {
    fn clone(&self) -> Self {
        Self {
            apply: self.apply.clone(),
            revert: self.revert.clone(),
        }
    }
}

/// Resolves a discovered location into its capability pair.
///
/// Loading is synchronous and happens at most once per unit per run. Any
/// error aborts the run before the unit's transaction opens.
pub trait UnitLoader<Tx: Send + Sync>: Send + Sync {
    fn resolve(&self, location: &str) -> Result<Capabilities<Tx>, LoadError>;
}

/// A fully resolved unit, built fresh on every run.
pub struct MigrationUnit<Tx: Send + Sync> {
    pub id: String,
    pub location: String,
    pub apply: Arc<dyn Capability<Tx>>,
    pub revert: Arc<dyn Capability<Tx>>,
}

impl<Tx: Send + Sync> MigrationUnit<Tx> {
    pub fn new(id: String, location: String, capabilities: Capabilities<Tx>) -> Self {
        Self {
            id,
            location,
            apply: capabilities.apply,
            revert: capabilities.revert,
        }
    }
}
