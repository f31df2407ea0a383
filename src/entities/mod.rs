pub mod ledger_entry;

pub use ledger_entry::{
    ActiveModel as LedgerEntryActiveModel, Column as LedgerEntryColumn,
    Entity as LedgerEntriesEntity, Model as LedgerEntryModel,
};
