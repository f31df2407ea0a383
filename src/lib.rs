pub mod cli;
pub mod config;
pub mod db;
pub mod engine;
pub mod entities;
pub mod errors;
pub mod loader;
pub mod repo;
pub mod services;
pub mod types;
pub mod utils;
