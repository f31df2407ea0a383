pub mod fs;
pub mod logger;
pub mod time;

pub use fs::{
    DEFAULT_MIGRATION_DIRECTORY, MIGRATION_DIRECTORY_ENV, detect_migration_directory, validate_dir,
};
pub use time::format_duration;
