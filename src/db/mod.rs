pub mod connection;
pub mod store;

pub use connection::init_db;
pub use store::SeaStore;
