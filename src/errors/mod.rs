use thiserror::Error;

use crate::types::{Action, Operation};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input, detected before any transaction opens.
    Configuration,
    Load,
    Execution,
    Ledger,
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read migration unit '{location}'")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Migration unit '{location}' has no '{marker}' section")]
    MissingSection {
        location: String,
        marker: &'static str,
    },

    #[error("Migration unit '{location}' repeats the '{marker}' section on line {line}")]
    DuplicateSection {
        location: String,
        marker: &'static str,
        line: usize,
    },

    #[error("Migration unit '{location}' has statements before its first section (line {line})")]
    StrayContent { location: String, line: usize },

    #[error("No migration registered for id '{id}' (location '{location}')")]
    Unregistered { id: String, location: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Migration '{id}' is not recorded in the ledger")]
    NotRecorded { id: String },
}

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("An action is required")]
    MissingAction,

    #[error(
        "The action '{0}' is invalid, expected version, commit, migrate, run, revert or rollback"
    )]
    InvalidAction(String),

    #[error("The action '{0}' does not operate on migrations")]
    UnsupportedAction(Action),

    #[error("No such directory {0}")]
    InvalidDirectory(String),

    #[error("Failed to discover migrations under '{dir}'")]
    Discovery {
        dir: String,
        #[source]
        source: BoxError,
    },

    #[error("Duplicate migration ids: {ids}")]
    DuplicateIds { ids: String },

    #[error("Migration '{id}' is recorded as applied but was not found under '{dir}'")]
    MissingUnit { id: String, dir: String },

    #[error("Failed to load migration '{id}'")]
    Load {
        id: String,
        #[source]
        source: LoadError,
    },

    #[error("Migration '{id}' failed during {operation} ({completed} committed before it)")]
    Execution {
        id: String,
        operation: Operation,
        completed: usize,
        #[source]
        source: BoxError,
    },

    #[error("Failed to read the migration ledger")]
    Ledger {
        #[source]
        source: BoxError,
    },
}

impl MigrateError {
    pub fn duplicate_ids(ids: Vec<String>) -> Self {
        Self::DuplicateIds {
            ids: ids.join(", "),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            MigrateError::MissingAction
            | MigrateError::InvalidAction(_)
            | MigrateError::UnsupportedAction(_)
            | MigrateError::InvalidDirectory(_)
            | MigrateError::Discovery { .. }
            | MigrateError::DuplicateIds { .. }
            | MigrateError::MissingUnit { .. } => ErrorKind::Configuration,
            MigrateError::Load { .. } => ErrorKind::Load,
            MigrateError::Execution { .. } => ErrorKind::Execution,
            MigrateError::Ledger { .. } => ErrorKind::Ledger,
        }
    }

    /// The unit being processed when the run failed, if any.
    pub fn unit_id(&self) -> Option<&str> {
        match self {
            MigrateError::MissingUnit { id, .. }
            | MigrateError::Load { id, .. }
            | MigrateError::Execution { id, .. } => Some(id),
            _ => None,
        }
    }
}
