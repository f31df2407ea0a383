use std::{
    collections::{BTreeSet, HashMap},
    sync::{Arc, Mutex},
};

use anyhow::{Result, bail};
use async_trait::async_trait;
use ormless::{
    engine::{Capabilities, FnStep, Ledger, Store, UnitLoader},
    errors::{LedgerError, LoadError},
};

/// Writes staged by a transaction, applied on commit.
#[derive(Debug, Clone)]
pub enum Op {
    CreateTable(String),
    DropTable(String),
    Record(String),
    Erase(String),
}

#[derive(Default)]
pub struct MemoryTx {
    ops: Mutex<Vec<Op>>,
}

impl MemoryTx {
    pub fn push(&self, op: Op) {
        self.ops.lock().unwrap().push(op);
    }

    fn staged(&self) -> Vec<Op> {
        self.ops.lock().unwrap().clone()
    }
}

#[derive(Default)]
struct MemoryState {
    tables: BTreeSet<String>,
    ledger: Vec<(u64, String)>,
    next_seq: u64,
    opened: usize,
    commits: usize,
    rollbacks: usize,
}

/// Shared in-memory database standing in for the migrated storage system.
#[derive(Clone, Default)]
pub struct MemoryDb {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryDb {
    pub fn tables(&self) -> Vec<String> {
        self.state.lock().unwrap().tables.iter().cloned().collect()
    }

    /// Ledger ids ordered by when they were recorded.
    pub fn ledger_ids(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        let mut entries = state.ledger.clone();
        entries.sort();
        entries.into_iter().map(|(_, id)| id).collect()
    }

    pub fn seed(&self, ids: &[&str]) {
        let mut state = self.state.lock().unwrap();
        for id in ids {
            state.next_seq += 1;
            let seq = state.next_seq;
            state.ledger.push((seq, id.to_string()));
            state.tables.insert(id.to_string());
        }
    }

    pub fn transactions_opened(&self) -> usize {
        self.state.lock().unwrap().opened
    }

    pub fn commits(&self) -> usize {
        self.state.lock().unwrap().commits
    }

    pub fn rollbacks(&self) -> usize {
        self.state.lock().unwrap().rollbacks
    }
}

#[async_trait]
impl Store for MemoryDb {
    type Tx = MemoryTx;

    async fn begin(&self) -> Result<MemoryTx> {
        self.state.lock().unwrap().opened += 1;
        Ok(MemoryTx::default())
    }

    async fn commit(&self, tx: MemoryTx) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        for op in tx.staged() {
            match op {
                Op::CreateTable(name) => {
                    state.tables.insert(name);
                }
                Op::DropTable(name) => {
                    state.tables.remove(&name);
                }
                Op::Record(id) => {
                    state.next_seq += 1;
                    let seq = state.next_seq;
                    state.ledger.push((seq, id));
                }
                Op::Erase(id) => state.ledger.retain(|(_, e)| *e != id),
            }
        }
        state.commits += 1;
        Ok(())
    }

    async fn rollback(&self, _tx: MemoryTx) -> Result<()> {
        self.state.lock().unwrap().rollbacks += 1;
        Ok(())
    }
}

pub struct MemoryLedger {
    db: MemoryDb,
    fail_record_for: Option<String>,
}

impl MemoryLedger {
    pub fn new(db: MemoryDb) -> Self {
        Self {
            db,
            fail_record_for: None,
        }
    }

    pub fn failing_record_for(mut self, id: &str) -> Self {
        self.fail_record_for = Some(id.to_string());
        self
    }

    fn contains(&self, id: &str) -> bool {
        self.db
            .state
            .lock()
            .unwrap()
            .ledger
            .iter()
            .any(|(_, e)| e == id)
    }
}

#[async_trait]
impl Ledger<MemoryTx> for MemoryLedger {
    async fn applied_ids(&self) -> Result<BTreeSet<String>> {
        Ok(self.db.ledger_ids().into_iter().collect())
    }

    async fn most_recent(&self) -> Result<Option<String>> {
        Ok(self.db.ledger_ids().pop())
    }

    async fn record(&self, id: &str, tx: &MemoryTx) -> Result<()> {
        if self.fail_record_for.as_deref() == Some(id) {
            bail!("ledger write for '{}' rejected", id);
        }
        if self.contains(id) {
            bail!("'{}' is already recorded", id);
        }
        tx.push(Op::Record(id.to_string()));
        Ok(())
    }

    async fn erase(&self, id: &str, tx: &MemoryTx) -> Result<()> {
        if !self.contains(id) {
            return Err(LedgerError::NotRecorded { id: id.to_string() }.into());
        }
        tx.push(Op::Erase(id.to_string()));
        Ok(())
    }
}

/// Creates the table named after the unit; the revert drops it.
pub fn create_table(name: &str) -> FnStep<impl Fn(&MemoryTx) -> Result<()> + Send + Sync + use<>> {
    let name = name.to_string();
    FnStep(move |tx: &MemoryTx| -> Result<()> {
        tx.push(Op::CreateTable(name.clone()));
        Ok(())
    })
}

pub fn drop_table(name: &str) -> FnStep<impl Fn(&MemoryTx) -> Result<()> + Send + Sync + use<>> {
    let name = name.to_string();
    FnStep(move |tx: &MemoryTx| -> Result<()> {
        tx.push(Op::DropTable(name.clone()));
        Ok(())
    })
}

/// Stages a table and then fails, like a statement error halfway through a
/// unit.
pub fn failing(name: &str) -> FnStep<impl Fn(&MemoryTx) -> Result<()> + Send + Sync + use<>> {
    let name = name.to_string();
    FnStep(move |tx: &MemoryTx| -> Result<()> {
        tx.push(Op::CreateTable(name.clone()));
        bail!("syntax error near '{}'", name)
    })
}

/// Counts how often each location is resolved.
pub struct CountingLoader<L> {
    inner: L,
    resolved: Mutex<HashMap<String, usize>>,
}

impl<L> CountingLoader<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            resolved: Mutex::new(HashMap::new()),
        }
    }

    pub fn resolutions(&self) -> HashMap<String, usize> {
        self.resolved.lock().unwrap().clone()
    }
}

impl<L: UnitLoader<MemoryTx>> UnitLoader<MemoryTx> for CountingLoader<L> {
    fn resolve(&self, location: &str) -> Result<Capabilities<MemoryTx>, LoadError> {
        *self
            .resolved
            .lock()
            .unwrap()
            .entry(location.to_string())
            .or_insert(0) += 1;
        self.inner.resolve(location)
    }
}
