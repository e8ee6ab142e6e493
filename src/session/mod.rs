//! Session state and the action dispatcher.

mod actions;
mod state;

pub use actions::{Action, Outcome, apply_action};
pub use state::Session;
