//! # Composition Root
//!
//! Builds the production object graph from [`DashboardConfig`]. Nothing else
//! in the crate constructs concrete services; everything below the
//! controller receives its collaborators as trait objects.

use std::sync::Arc;

use crate::core::config::DashboardConfig;
use crate::core::service::{KeyValueStore, WalletService};
use crate::services::{ApiClient, FileStore, HistoryStack, RpcWallet, TracingAnalytics};
use crate::session::{Collaborators, InitOutcome, SessionController};
use crate::state::{CollectionsState, InvestmentsState, OverrideStore};
use crate::ui::ConsoleView;

pub struct Dashboard {
    pub controller: Arc<SessionController>,
    pub collections: Arc<CollectionsState>,
    pub investments: Arc<InvestmentsState>,
    pub view: Arc<ConsoleView>,
    pub history: Arc<HistoryStack>,
}

impl Dashboard {
    /// Production wiring, persisting overrides to `config.storage_path`.
    pub fn from_config(config: &DashboardConfig) -> Self {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.storage_path));
        Self::with_store(config, store)
    }

    /// Production wiring over an explicit key-value backend.
    pub fn with_store(config: &DashboardConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let api = Arc::new(ApiClient::new(config));
        let wallet: Option<Arc<dyn WalletService>> = config
            .wallet_rpc_url
            .clone()
            .map(|url| Arc::new(RpcWallet::new(Some(url))) as Arc<dyn WalletService>);

        let collections = Arc::new(CollectionsState::new(
            OverrideStore::new(store),
            config.fetch_timeout,
        ));
        let investments = Arc::new(InvestmentsState::new(config.fetch_timeout));
        let view = Arc::new(ConsoleView::new());
        let history = Arc::new(HistoryStack::new());

        let controller = Arc::new(SessionController::new(
            Collaborators {
                wallet,
                collections: api.clone(),
                investments: api,
                history: history.clone(),
                view: view.clone(),
                analytics: Arc::new(TracingAnalytics),
            },
            Arc::clone(&collections),
            Arc::clone(&investments),
            config.network_rpc_url.clone(),
        ));

        tracing::info!(
            wallet = config.wallet_rpc_url.is_some(),
            storage = %config.storage_path.display(),
            "Dashboard assembled"
        );

        Self {
            controller,
            collections,
            investments,
            view,
            history,
        }
    }
}

impl Dashboard {
    /// Step back through recorded history and replay the entry reached.
    ///
    /// `None` when there is nothing to go back to.
    pub fn navigate_back(&self) -> Option<InitOutcome> {
        let entry = self.history.back()?;
        Some(self.controller.on_navigate(entry))
    }

    /// Step forward through recorded history and replay the entry reached.
    pub fn navigate_forward(&self) -> Option<InitOutcome> {
        let entry = self.history.forward()?;
        Some(self.controller.on_navigate(Some(entry)))
    }
}
