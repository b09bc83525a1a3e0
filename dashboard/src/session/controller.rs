//! # Session Controller
//!
//! Decides which address the dashboard shows and dispatches both data
//! fetches for it.
//!
//! ```text
//!            explicit address               both fetches dispatched
//!   Idle ─────────────────────▶ ResolvingFromAddress ─────────────────▶ Populated
//!    │                                  ▲
//!    │ wallet present, no address       │ wallet answered
//!    ▼                                  │
//!   ResolvingFromProvider ──────────────┘
//!    │
//!    └── wallet unavailable / rejected ──▶ Idle
//! ```
//!
//! Every entry point bumps a session epoch. A wallet answer that arrives
//! after a newer entry point has run is dropped, the same way the state
//! containers drop superseded fetches.
//!
//! Transitions are synchronous and serialized by the session lock; the only
//! suspension point is the wallet request, which runs on its own task.

use async_channel::Receiver;
use parking_lot::Mutex;
use shared::Address;
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use super::connection::{ChainConnection, ConnectionKind, ConnectionSlot};
use super::events::UserAction;
use super::navigation::{address_url, NavigationEntry, ROOT_URL};
use crate::core::error::WalletError;
use crate::core::service::{
    Analytics, CollectionsProvider, DashboardView, History, InvestmentsProvider, WalletService,
};
use crate::debug::{resolution_span, spawn_tracked};
use crate::state::{CollectionsState, InvestmentsState, PendingHandle, Settlement};
use crate::utils::url::query_param;

/// Where the session currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    ResolvingFromProvider,
    ResolvingFromAddress(Address),
    Populated(Address),
}

impl SessionState {
    pub fn address(&self) -> Option<&Address> {
        match self {
            SessionState::ResolvingFromAddress(address) | SessionState::Populated(address) => {
                Some(address)
            }
            SessionState::Idle | SessionState::ResolvingFromProvider => None,
        }
    }
}

/// External collaborators of the controller.
pub struct Collaborators {
    /// `None` when the environment has no wallet capability at all
    pub wallet: Option<Arc<dyn WalletService>>,
    pub collections: Arc<dyn CollectionsProvider>,
    pub investments: Arc<dyn InvestmentsProvider>,
    pub history: Arc<dyn History>,
    pub view: Arc<dyn DashboardView>,
    pub analytics: Arc<dyn Analytics>,
}

/// Both fetches handed to the containers for one address.
#[derive(Debug)]
pub struct Dispatch {
    pub address: Address,
    pub collections: PendingHandle,
    pub investments: PendingHandle,
}

/// Result of an entry point.
#[derive(Debug)]
pub enum InitOutcome {
    /// Fetches for an address were dispatched
    Dispatched(Dispatch),
    /// The wallet was asked for an address; the handle yields what happened next
    AwaitingWallet(JoinHandle<InitOutcome>),
    /// Nothing to show; connect prompt
    Idle,
    /// A newer entry point ran while this one was waiting
    Superseded,
}

impl Dispatch {
    /// Wait for both fetches to settle.
    pub async fn settled(self) -> Result<(Settlement, Settlement), JoinError> {
        let (collections, investments) = tokio::join!(self.collections, self.investments);
        Ok((collections?, investments?))
    }
}

impl InitOutcome {
    /// Follow a wallet request through to its dispatch, if there is one.
    pub async fn dispatched(self) -> Result<Option<Dispatch>, JoinError> {
        let mut outcome = self;
        loop {
            match outcome {
                InitOutcome::Dispatched(dispatch) => return Ok(Some(dispatch)),
                InitOutcome::AwaitingWallet(handle) => outcome = handle.await?,
                InitOutcome::Idle | InitOutcome::Superseded => return Ok(None),
            }
        }
    }
}

struct Session {
    state: SessionState,
    epoch: u64,
}

pub struct SessionController {
    wallet: Option<Arc<dyn WalletService>>,
    collections_provider: Arc<dyn CollectionsProvider>,
    investments_provider: Arc<dyn InvestmentsProvider>,
    history: Arc<dyn History>,
    view: Arc<dyn DashboardView>,
    analytics: Arc<dyn Analytics>,
    collections: Arc<CollectionsState>,
    investments: Arc<InvestmentsState>,
    connection: ConnectionSlot,
    network_rpc_url: String,
    session: Mutex<Session>,
}

impl SessionController {
    pub fn new(
        collaborators: Collaborators,
        collections: Arc<CollectionsState>,
        investments: Arc<InvestmentsState>,
        network_rpc_url: impl Into<String>,
    ) -> Self {
        Self {
            wallet: collaborators.wallet,
            collections_provider: collaborators.collections,
            investments_provider: collaborators.investments,
            history: collaborators.history,
            view: collaborators.view,
            analytics: collaborators.analytics,
            collections,
            investments,
            connection: ConnectionSlot::new(),
            network_rpc_url: network_rpc_url.into(),
            session: Mutex::new(Session {
                state: SessionState::Idle,
                epoch: 0,
            }),
        }
    }

    pub fn state(&self) -> SessionState {
        self.session.lock().state.clone()
    }

    /// Address being shown or resolved, if any.
    pub fn active_address(&self) -> Option<Address> {
        self.session.lock().state.address().cloned()
    }

    pub fn collections(&self) -> &Arc<CollectionsState> {
        &self.collections
    }

    pub fn investments(&self) -> &Arc<InvestmentsState> {
        &self.investments
    }

    /// Connection used by the most recent dispatch.
    pub fn connection(&self) -> Option<ChainConnection> {
        self.connection.current()
    }

    /// Page-load entry point: `query` is the raw query string, with or
    /// without the leading `?`.
    pub fn start(self: &Arc<Self>, query: &str) -> InitOutcome {
        if self.available_wallet().is_some() {
            self.analytics.wallet_exists();
        }

        let address = query_param(query, "address").and_then(|raw| match Address::parse(&raw) {
            Ok(address) => Some(address),
            Err(e) => {
                warn!(raw = %raw, error = %e, "Ignoring unusable address query parameter");
                None
            }
        });
        self.init(address)
    }

    /// Resolve `address` if given, otherwise ask the wallet (if any).
    pub fn init(self: &Arc<Self>, address: Option<Address>) -> InitOutcome {
        let mut session = self.session.lock();
        session.epoch += 1;

        if let Some(address) = address {
            self.analytics.init_from_query_param(&address);
            self.view.set_address_input(address.as_str());
            return self.dispatch(&mut session, address, "address");
        }

        self.view.set_address_input("");
        match self.available_wallet() {
            Some(wallet) => self.request_wallet_address(&mut session, Arc::clone(wallet)),
            None => {
                info!("No wallet and no address; waiting for input");
                session.state = SessionState::Idle;
                self.view.set_panels_visible(false);
                InitOutcome::Idle
            }
        }
    }

    /// The user pressed "connect wallet".
    pub fn on_wallet_connected(self: &Arc<Self>) -> InitOutcome {
        self.history.push(NavigationEntry::root(), ROOT_URL);
        self.init(None)
    }

    /// The user submitted an address by hand.
    pub fn on_custom_address(self: &Arc<Self>, address: Address) -> InitOutcome {
        let url = address_url(&address);
        self.history
            .push(NavigationEntry::for_address(address.clone()), &url);
        self.init(Some(address))
    }

    /// Back/forward navigation. Replays never push history.
    pub fn on_navigate(self: &Arc<Self>, entry: Option<NavigationEntry>) -> InitOutcome {
        self.init(entry.and_then(|entry| entry.custom_address))
    }

    pub fn handle(self: &Arc<Self>, action: UserAction) -> InitOutcome {
        debug!(action = ?action, "Handling user action");
        match action {
            UserAction::ConnectWallet => self.on_wallet_connected(),
            UserAction::SubmitAddress(address) => self.on_custom_address(address),
            UserAction::Navigate(entry) => self.on_navigate(entry),
        }
    }

    /// Consume actions in order until every sender is dropped.
    pub async fn run(self: Arc<Self>, actions: Receiver<UserAction>) {
        while let Ok(action) = actions.recv().await {
            self.handle(action);
        }
        info!("Action channel closed, session loop exiting");
    }

    fn available_wallet(&self) -> Option<&Arc<dyn WalletService>> {
        self.wallet.as_ref().filter(|wallet| wallet.is_available())
    }

    fn request_wallet_address(
        self: &Arc<Self>,
        session: &mut Session,
        wallet: Arc<dyn WalletService>,
    ) -> InitOutcome {
        let epoch = session.epoch;
        session.state = SessionState::ResolvingFromProvider;
        self.view.set_panels_visible(false);

        let controller = Arc::clone(self);
        let span = resolution_span("wallet", None);
        let handle = span.in_scope(|| {
            spawn_tracked("session.wallet", async move {
                let answer = wallet.request_address().await;
                controller.on_wallet_answer(epoch, answer)
            })
        });
        InitOutcome::AwaitingWallet(handle)
    }

    fn on_wallet_answer(&self, epoch: u64, answer: Result<Address, WalletError>) -> InitOutcome {
        let mut session = self.session.lock();
        if session.epoch != epoch {
            debug!(epoch, latest = session.epoch, "Wallet answer superseded");
            return InitOutcome::Superseded;
        }

        match answer {
            Ok(address) => {
                self.analytics.wallet_connected(&address);
                self.dispatch(&mut session, address, "wallet")
            }
            Err(WalletError::Unavailable) => {
                info!("Wallet became unavailable; staying idle");
                session.state = SessionState::Idle;
                InitOutcome::Idle
            }
            Err(e) => {
                warn!(error = %e, "Wallet did not disclose an address");
                self.analytics.wallet_exists_not_connected();
                session.state = SessionState::Idle;
                InitOutcome::Idle
            }
        }
    }

    fn dispatch(&self, session: &mut Session, address: Address, origin: &'static str) -> InitOutcome {
        let span = resolution_span(origin, Some(&address));
        let _entered = span.enter();

        session.state = SessionState::ResolvingFromAddress(address.clone());
        self.view.set_panels_visible(false);

        let connection = self.acquire_connection();
        info!(connection_id = connection.id(), "Dispatching collection and investment fetches");

        let provider = Arc::clone(&self.collections_provider);
        let target = address.clone();
        let collections = self.collections.set_pending(address.clone(), async move {
            provider.fetch_collections(&target).await
        });

        let provider = Arc::clone(&self.investments_provider);
        let target = address.clone();
        let investments = self.investments.set_pending(async move {
            provider.fetch_investment_stats(&target, &connection).await
        });

        self.view.set_panels_visible(true);
        session.state = SessionState::Populated(address.clone());

        InitOutcome::Dispatched(Dispatch {
            address,
            collections,
            investments,
        })
    }

    fn acquire_connection(&self) -> ChainConnection {
        match self.available_wallet() {
            Some(wallet) => {
                let endpoint = wallet.rpc_url().unwrap_or(&self.network_rpc_url);
                self.connection.acquire(ConnectionKind::Injected, endpoint)
            }
            None => self
                .connection
                .acquire(ConnectionKind::Network, &self.network_rpc_url),
        }
    }
}
