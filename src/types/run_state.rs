use colored::*;
use strum_macros::Display;

/// Lifecycle of a single orchestrator run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Default)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RunState {
    #[default]
    Idle,
    Resolving,
    Executing,
    Committed,
    Aborted,
}

impl RunState {
    pub fn to_colored_string(&self) -> String {
        match self {
            RunState::Idle => "IDLE".bright_black().to_string(),
            RunState::Resolving => "RESOLVING".blue().to_string(),
            RunState::Executing => "EXECUTING".blue().bold().to_string(),
            RunState::Committed => "COMMITTED".green().bold().to_string(),
            RunState::Aborted => "ABORTED".red().bold().to_string(),
        }
    }
}
