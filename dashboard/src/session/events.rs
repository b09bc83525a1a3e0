//! # User Actions
//!
//! Everything the user can do to the session, sent as messages over an
//! `async_channel` and consumed in order by [`super::SessionController::run`].

use async_channel::{Receiver, Sender};
use shared::Address;

use super::navigation::NavigationEntry;

/// User-initiated session events
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    /// "Connect wallet" pressed
    ConnectWallet,
    /// An address typed into the manual address input
    SubmitAddress(Address),
    /// Back/forward navigation replaying a recorded entry (or none)
    Navigate(Option<NavigationEntry>),
}

/// Unbounded action bus.
pub fn action_channel() -> (Sender<UserAction>, Receiver<UserAction>) {
    async_channel::unbounded()
}
