pub mod registry;
pub mod sql_script;

pub use registry::RegistryLoader;
pub use sql_script::{DOWN_MARKER, SqlScript, SqlScriptLoader, UP_MARKER};
