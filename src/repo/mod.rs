pub mod ledger_repo;

pub use ledger_repo::LedgerRepository;
