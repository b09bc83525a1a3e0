//! Terminal-backed [`DashboardView`].

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::render::{render_collections, render_stats, render_update};
use crate::core::service::DashboardView;
use crate::state::{CollectionsState, InvestmentsState, SubscriptionId};

/// Remembers panel visibility and the address input, and prints panel
/// updates while the panels are visible.
#[derive(Default)]
pub struct ConsoleView {
    panels_visible: AtomicBool,
    address_input: RwLock<String>,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panels_visible(&self) -> bool {
        self.panels_visible.load(Ordering::SeqCst)
    }

    pub fn address_input(&self) -> String {
        self.address_input.read().clone()
    }

    /// Print every update of both containers to stdout.
    pub fn attach(
        self: &Arc<Self>,
        collections: &CollectionsState,
        investments: &InvestmentsState,
    ) -> (SubscriptionId, SubscriptionId) {
        let view = Arc::clone(self);
        let collections_id = collections.subscribe(move |update| {
            if view.panels_visible() {
                print!("{}", render_update("Collections", update, render_collections));
            }
        });

        let view = Arc::clone(self);
        let investments_id = investments.subscribe(move |update| {
            if view.panels_visible() {
                print!("{}", render_update("Investments", update, render_stats));
            }
        });

        (collections_id, investments_id)
    }
}

impl DashboardView for ConsoleView {
    fn set_panels_visible(&self, visible: bool) {
        self.panels_visible.store(visible, Ordering::SeqCst);
        tracing::debug!(visible, "Panels visibility changed");
    }

    fn set_address_input(&self, value: &str) {
        *self.address_input.write() = value.to_string();
    }
}
