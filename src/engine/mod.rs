pub mod discovery;
pub mod identity;
pub mod ledger;
pub mod orchestrator;
pub mod store;
pub mod unit;

pub use discovery::{Candidate, discover, find_duplicates};
pub use identity::derive_id;
pub use ledger::Ledger;
pub use orchestrator::{Orchestrator, RunOutcome};
pub use store::Store;
pub use unit::{Capabilities, Capability, FnStep, MigrationUnit, UnitLoader};
