mod action;
mod run_state;

pub use action::{Action, Operation};
pub use run_state::RunState;
