#![allow(dead_code)]
#![allow(unused_imports)]

pub mod memory;
pub mod units;

pub use memory::{
    CountingLoader, MemoryDb, MemoryLedger, MemoryTx, create_table, drop_table, failing,
};
pub use units::{touch_unit, write_file, write_sql_unit};
