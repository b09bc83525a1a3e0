//! # Session
//!
//! Address resolution state machine and the plumbing around it.
//!
//! - **[`controller`]**: [`SessionController`], the state machine itself
//! - **[`connection`]**: [`ConnectionSlot`] and the shared [`ChainConnection`]
//! - **[`events`]**: [`UserAction`] messages consumed by [`SessionController::run`]
//! - **[`navigation`]**: [`NavigationEntry`] history records and their URLs

pub mod connection;
pub mod controller;
pub mod events;
pub mod navigation;

#[cfg(test)]
mod tests;

pub use connection::{ChainConnection, ConnectionKind, ConnectionSlot};
pub use controller::{Collaborators, Dispatch, InitOutcome, SessionController, SessionState};
pub use events::{action_channel, UserAction};
pub use navigation::{address_url, NavigationEntry, ROOT_URL};
