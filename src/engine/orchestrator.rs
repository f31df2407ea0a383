//! Apply and rollback decisions over a linear sequence of migration units.
//!
//! A run discovers the units under a directory, compares them with the
//! ledger and then applies every pending unit in discovery order, or reverts
//! the most recently applied one. Each unit runs in its own transaction
//! together with its ledger write, so a unit is either applied and recorded
//! or neither.
//!
//! Only one orchestrator may run against a given ledger at a time. Nothing
//! here takes a lock; two concurrent runs can apply the same unit twice
//! unless the storage system serializes them.
//!
//! The guarantee holds only where schema changes are transactional. MySQL
//! commits DDL implicitly, so on MySQL a unit whose ledger write fails after
//! its DDL ran stays applied without a ledger entry.

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::{
    engine::{
        discovery::{Candidate, discover, find_duplicates},
        ledger::Ledger,
        store::Store,
        unit::{MigrationUnit, UnitLoader},
    },
    errors::{LedgerError, MigrateError},
    types::{Action, Operation, RunState},
    utils::{format_duration, validate_dir},
};

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub operation: Operation,
    /// Ids touched by the run, in execution order.
    pub units: Vec<String>,
    pub state: RunState,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl RunOutcome {
    pub fn count(&self) -> usize {
        self.units.len()
    }

    pub fn is_noop(&self) -> bool {
        self.units.is_empty()
    }

    pub fn summary(&self) -> String {
        let verb = match self.operation {
            Operation::ApplyAllPending => "Applied",
            Operation::RevertLast => "Reverted",
        };
        format!(
            "{} {} migration(s) in {}",
            verb,
            self.count(),
            format_duration(self.started_at, self.ended_at)
        )
    }
}

struct RunTracker {
    operation: Operation,
    state: RunState,
    started_at: DateTime<Utc>,
}

impl RunTracker {
    fn start(operation: Operation) -> Self {
        info!("Migration ({}) has been started", operation);
        Self {
            operation,
            state: RunState::Idle,
            started_at: Utc::now(),
        }
    }

    fn enter(&mut self, next: RunState) {
        debug!("Run state {} -> {}", self.state, next);
        self.state = next;
    }

    fn abort(&mut self, err: MigrateError) -> MigrateError {
        self.enter(RunState::Aborted);
        error!("Migration ({}) has been aborted: {}", self.operation, err);
        err
    }

    fn commit(mut self, units: Vec<String>) -> RunOutcome {
        self.enter(RunState::Committed);
        info!("Migration ({}) has been finished", self.operation);
        RunOutcome {
            operation: self.operation,
            units,
            state: self.state,
            started_at: self.started_at,
            ended_at: Utc::now(),
        }
    }
}

pub struct Orchestrator<S: Store> {
    store: Arc<S>,
    ledger: Arc<dyn Ledger<S::Tx>>,
    loader: Arc<dyn UnitLoader<S::Tx>>,
    suffix: String,
}

impl<S: Store> Orchestrator<S> {
    pub fn new(
        store: Arc<S>,
        ledger: Arc<dyn Ledger<S::Tx>>,
        loader: Arc<dyn UnitLoader<S::Tx>>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            store,
            ledger,
            loader,
            suffix: suffix.into(),
        }
    }

    pub async fn run(&self, action: Action, directory: &Path) -> Result<RunOutcome, MigrateError> {
        let operation = action
            .operation()
            .ok_or(MigrateError::UnsupportedAction(action))?;
        self.execute(operation, directory).await
    }

    pub async fn execute(
        &self,
        operation: Operation,
        directory: &Path,
    ) -> Result<RunOutcome, MigrateError> {
        let mut run = RunTracker::start(operation);
        let result = match operation {
            Operation::ApplyAllPending => self.apply_all_pending(&mut run, directory).await,
            Operation::RevertLast => self.revert_last(&mut run, directory).await,
        };
        match result {
            Ok(units) => Ok(run.commit(units)),
            Err(err) => Err(run.abort(err)),
        }
    }

    async fn apply_all_pending(
        &self,
        run: &mut RunTracker,
        directory: &Path,
    ) -> Result<Vec<String>, MigrateError> {
        run.enter(RunState::Resolving);
        let candidates = self.candidates(directory)?;
        if candidates.is_empty() {
            info!("No migrations");
            return Ok(Vec::new());
        }

        let applied = self
            .ledger
            .applied_ids()
            .await
            .map_err(|e| MigrateError::Ledger { source: e.into() })?;

        let pending: Vec<Candidate> = candidates
            .into_iter()
            .filter(|c| !applied.contains(&c.id))
            .collect();
        if pending.is_empty() {
            info!("Migrations are up to date ({} applied)", applied.len());
            return Ok(Vec::new());
        }
        info!("{} pending migration(s)", pending.len());

        let mut done = Vec::with_capacity(pending.len());
        for candidate in pending {
            run.enter(RunState::Resolving);
            let unit = self.load(candidate)?;

            run.enter(RunState::Executing);
            self.apply_unit(&unit)
                .await
                .map_err(|e| MigrateError::Execution {
                    id: unit.id.clone(),
                    operation: Operation::ApplyAllPending,
                    completed: done.len(),
                    source: e.into(),
                })?;

            info!("Applied migration '{}'", unit.id);
            done.push(unit.id);
        }

        Ok(done)
    }

    async fn revert_last(
        &self,
        run: &mut RunTracker,
        directory: &Path,
    ) -> Result<Vec<String>, MigrateError> {
        run.enter(RunState::Resolving);
        validate_dir(directory)?;

        let Some(id) = self
            .ledger
            .most_recent()
            .await
            .map_err(|e| MigrateError::Ledger { source: e.into() })?
        else {
            info!("Nothing to revert");
            return Ok(Vec::new());
        };

        let candidate = self
            .candidates(directory)?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| MigrateError::MissingUnit {
                id: id.clone(),
                dir: directory.display().to_string(),
            })?;
        let unit = self.load(candidate)?;

        run.enter(RunState::Executing);
        self.revert_unit(&unit)
            .await
            .map_err(|e| MigrateError::Execution {
                id: unit.id.clone(),
                operation: Operation::RevertLast,
                completed: 0,
                source: e.into(),
            })?;

        info!("Reverted migration '{}'", unit.id);
        Ok(vec![unit.id])
    }

    /// Discovered candidates, rejecting id collisions.
    fn candidates(&self, directory: &Path) -> Result<Vec<Candidate>, MigrateError> {
        validate_dir(directory)?;

        let candidates =
            discover(directory, &self.suffix).map_err(|e| MigrateError::Discovery {
                dir: directory.display().to_string(),
                source: e.into(),
            })?;
        debug!(
            "Discovered {} migration unit(s) under '{}'",
            candidates.len(),
            directory.display()
        );

        let duplicates = find_duplicates(&candidates);
        if !duplicates.is_empty() {
            return Err(MigrateError::duplicate_ids(duplicates));
        }
        Ok(candidates)
    }

    fn load(&self, candidate: Candidate) -> Result<MigrationUnit<S::Tx>, MigrateError> {
        debug!("Loading '{}' from '{}'", candidate.id, candidate.location);
        match self.loader.resolve(&candidate.location) {
            Ok(capabilities) => Ok(MigrationUnit::new(
                candidate.id,
                candidate.location,
                capabilities,
            )),
            Err(source) => Err(MigrateError::Load {
                id: candidate.id,
                source,
            }),
        }
    }

    async fn apply_unit(&self, unit: &MigrationUnit<S::Tx>) -> Result<()> {
        let tx = self
            .store
            .begin()
            .await
            .context("Failed to open transaction")?;

        let result = async {
            unit.apply
                .invoke(&tx)
                .await
                .context(format!("Failed to apply '{}'", unit.id))?;
            self.ledger
                .record(&unit.id, &tx)
                .await
                .context(format!("Failed to record '{}' in the ledger", unit.id))
        }
        .await;

        self.settle(tx, result, &unit.id).await
    }

    async fn revert_unit(&self, unit: &MigrationUnit<S::Tx>) -> Result<()> {
        let tx = self
            .store
            .begin()
            .await
            .context("Failed to open transaction")?;

        let result = async {
            unit.revert
                .invoke(&tx)
                .await
                .context(format!("Failed to revert '{}'", unit.id))?;
            match self.ledger.erase(&unit.id, &tx).await {
                Ok(()) => Ok(()),
                Err(e) if is_not_recorded(&e) => {
                    warn!("Ledger anomaly while reverting '{}': {}", unit.id, e);
                    Ok(())
                }
                Err(e) => Err(e.context(format!("Failed to erase '{}' from the ledger", unit.id))),
            }
        }
        .await;

        self.settle(tx, result, &unit.id).await
    }

    /// Commits on success, rolls back otherwise.
    async fn settle(&self, tx: S::Tx, result: Result<()>, id: &str) -> Result<()> {
        match result {
            Ok(()) => self
                .store
                .commit(tx)
                .await
                .context(format!("Failed to commit '{}'", id)),
            Err(e) => {
                if let Err(rollback_err) = self.store.rollback(tx).await {
                    error!("Failed to roll back '{}': {:#}", id, rollback_err);
                }
                Err(e)
            }
        }
    }
}

fn is_not_recorded(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::NotRecorded { .. })
    )
}
