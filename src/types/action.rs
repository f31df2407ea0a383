use std::str::FromStr;

use strum_macros::{Display, EnumString};

use crate::errors::MigrateError;

/// An action from the command-line vocabulary. Matching is exact and
/// case-sensitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
pub enum Action {
    #[strum(serialize = "version")]
    Version,

    #[strum(to_string = "commit", serialize = "migrate", serialize = "run")]
    Apply,

    #[strum(to_string = "revert", serialize = "rollback")]
    Revert,
}

impl Action {
    pub fn parse(value: &str) -> Result<Self, MigrateError> {
        Self::from_str(value).map_err(|_| MigrateError::InvalidAction(value.to_string()))
    }

    /// The engine operation behind this action. `Version` never touches
    /// storage and has none.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Action::Version => None,
            Action::Apply => Some(Operation::ApplyAllPending),
            Action::Revert => Some(Operation::RevertLast),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Operation {
    ApplyAllPending,
    RevertLast,
}
