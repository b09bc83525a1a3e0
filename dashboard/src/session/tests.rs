//! Scenario tests for the session controller, driven by hand-written doubles
//! whose futures the tests complete explicitly.

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::{Address, CollectionEntry, InvestmentStats};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

use super::*;
use crate::core::error::{FetchError, WalletError};
use crate::core::service::{
    Analytics, CollectionsProvider, DashboardView, History, InvestmentsProvider, KeyValueStore,
    WalletService,
};
use crate::services::storage::MemoryStore;
use crate::state::{CollectionsState, InvestmentsState, OverrideStore, Settlement, Status};

type CollectionsReply = Result<Vec<CollectionEntry>, FetchError>;

#[derive(Default)]
struct ScriptedCollections {
    pending: Mutex<HashMap<Address, oneshot::Receiver<CollectionsReply>>>,
    calls: Mutex<Vec<Address>>,
}

impl ScriptedCollections {
    /// Register the next fetch for `address`; the test answers through the sender.
    fn expect(&self, address: &Address) -> oneshot::Sender<CollectionsReply> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(address.clone(), rx);
        tx
    }
}

#[async_trait]
impl CollectionsProvider for ScriptedCollections {
    async fn fetch_collections(&self, address: &Address) -> Result<Vec<CollectionEntry>, FetchError> {
        self.calls.lock().push(address.clone());
        let reply = self.pending.lock().remove(address);
        match reply {
            Some(rx) => rx.await.map_err(|_| FetchError::Cancelled)?,
            None => Err(FetchError::Provider(format!("no scripted reply for {}", address))),
        }
    }
}

#[derive(Default)]
struct InstantInvestments {
    connections: Mutex<Vec<(u64, ConnectionKind)>>,
}

#[async_trait]
impl InvestmentsProvider for InstantInvestments {
    async fn fetch_investment_stats(
        &self,
        address: &Address,
        connection: &ChainConnection,
    ) -> Result<InvestmentStats, FetchError> {
        self.connections
            .lock()
            .push((connection.id(), connection.kind()));
        Ok(InvestmentStats::from_trades(address.clone(), &[], None))
    }
}

struct ScriptedWallet {
    available: AtomicBool,
    answer: Mutex<Option<oneshot::Receiver<Result<Address, WalletError>>>>,
}

impl ScriptedWallet {
    fn new(available: bool) -> Self {
        Self {
            available: AtomicBool::new(available),
            answer: Mutex::new(None),
        }
    }

    fn expect_request(&self) -> oneshot::Sender<Result<Address, WalletError>> {
        let (tx, rx) = oneshot::channel();
        *self.answer.lock() = Some(rx);
        tx
    }
}

#[async_trait]
impl WalletService for ScriptedWallet {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn rpc_url(&self) -> Option<&str> {
        Some("http://wallet.invalid")
    }

    async fn request_address(&self) -> Result<Address, WalletError> {
        let answer = self.answer.lock().take();
        match answer {
            Some(rx) => rx.await.unwrap_or(Err(WalletError::Unavailable)),
            None => Err(WalletError::Unavailable),
        }
    }
}

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl Recorder {
    fn record(&self, event: String) {
        self.events.lock().push(event);
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }
}

impl History for Recorder {
    fn push(&self, entry: NavigationEntry, url: &str) {
        self.record(format!("push {:?} {}", entry.custom_address.map(|a| a.to_string()), url));
    }
}

impl DashboardView for Recorder {
    fn set_panels_visible(&self, visible: bool) {
        self.record(format!("panels {}", visible));
    }

    fn set_address_input(&self, value: &str) {
        self.record(format!("input {}", value));
    }
}

impl Analytics for Recorder {
    fn wallet_exists(&self) {
        self.record("wallet_exists".to_string());
    }

    fn wallet_connected(&self, address: &Address) {
        self.record(format!("wallet_connected {}", address));
    }

    fn wallet_exists_not_connected(&self) {
        self.record("wallet_exists_not_connected".to_string());
    }

    fn init_from_query_param(&self, address: &Address) {
        self.record(format!("init_from_query_param {}", address));
    }
}

struct Harness {
    controller: Arc<SessionController>,
    collections: Arc<ScriptedCollections>,
    investments: Arc<InstantInvestments>,
    store: Arc<MemoryStore>,
    history: Arc<Recorder>,
    view: Arc<Recorder>,
    analytics: Arc<Recorder>,
}

fn harness(wallet: Option<Arc<ScriptedWallet>>) -> Harness {
    let collections = Arc::new(ScriptedCollections::default());
    let investments = Arc::new(InstantInvestments::default());
    let store = Arc::new(MemoryStore::new());
    let history = Arc::new(Recorder::default());
    let view = Arc::new(Recorder::default());
    let analytics = Arc::new(Recorder::default());

    let collections_state = Arc::new(CollectionsState::new(
        OverrideStore::new(store.clone()),
        Duration::from_secs(5),
    ));
    let investments_state = Arc::new(InvestmentsState::new(Duration::from_secs(5)));

    let controller = Arc::new(SessionController::new(
        Collaborators {
            wallet: wallet.map(|w| w as Arc<dyn WalletService>),
            collections: collections.clone(),
            investments: investments.clone(),
            history: history.clone(),
            view: view.clone(),
            analytics: analytics.clone(),
        },
        collections_state,
        investments_state,
        "http://node.invalid",
    ));

    Harness {
        controller,
        collections,
        investments,
        store,
        history,
        view,
        analytics,
    }
}

fn address(raw: &str) -> Address {
    Address::parse(raw).unwrap()
}

fn entries(slugs: &[&str]) -> Vec<CollectionEntry> {
    slugs.iter().map(|slug| CollectionEntry::new(*slug)).collect()
}

fn dispatched(outcome: InitOutcome) -> Dispatch {
    match outcome {
        InitOutcome::Dispatched(dispatch) => dispatch,
        other => panic!("expected dispatch, got {:?}", other),
    }
}

async fn awaited(outcome: InitOutcome) -> InitOutcome {
    match outcome {
        InitOutcome::AwaitingWallet(handle) => handle.await.unwrap(),
        other => panic!("expected wallet request, got {:?}", other),
    }
}

#[tokio::test]
async fn test_address_switch_mid_flight_keeps_latest() {
    let h = harness(None);
    let x = address("0xX");
    let y = address("0xY");
    h.store
        .write_string("hidden_collections_0xX", r#"["a"]"#)
        .unwrap();

    let notified = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&notified);
    h.controller
        .collections()
        .subscribe(move |update| sink.lock().push(update.value().map(|l| l.address.clone())));

    let reply_x = h.collections.expect(&x);
    let reply_y = h.collections.expect(&y);
    let first = dispatched(h.controller.init(Some(x.clone())));
    let second = dispatched(h.controller.init(Some(y.clone())));

    reply_x.send(Ok(entries(&["a", "b"]))).unwrap();
    assert_eq!(first.collections.await.unwrap(), Settlement::Superseded);
    assert!(notified.lock().is_empty());

    reply_y.send(Ok(entries(&["a", "c"]))).unwrap();
    assert_eq!(second.collections.await.unwrap(), Settlement::Applied);

    let list = h.controller.collections().get().unwrap();
    assert_eq!(list.address, y);
    // X's override set must not leak into Y's listing
    assert!(h.controller.collections().is_visible("a"));
    assert_eq!(*notified.lock(), vec![Some(y.clone())]);
    assert_eq!(h.controller.state(), SessionState::Populated(y));
}

#[tokio::test]
async fn test_start_with_query_address() {
    let h = harness(None);
    let reply = h.collections.expect(&address("0xabc"));

    let dispatch = dispatched(h.controller.start("?address=0xabc"));
    assert_eq!(dispatch.address, address("0xabc"));
    assert_eq!(h.controller.state(), SessionState::Populated(address("0xabc")));

    reply.send(Ok(entries(&["punks"]))).unwrap();
    dispatch.collections.await.unwrap();
    dispatch.investments.await.unwrap();

    assert_eq!(h.analytics.events(), vec!["init_from_query_param 0xabc"]);
    assert_eq!(
        h.view.events(),
        vec!["input 0xabc", "panels false", "panels true"]
    );
    assert!(h.history.events().is_empty());
    assert_eq!(h.controller.investments().status(), Status::Ready);
}

#[tokio::test]
async fn test_start_without_wallet_or_address_is_idle() {
    let h = harness(None);
    assert!(matches!(h.controller.start(""), InitOutcome::Idle));
    assert_eq!(h.controller.state(), SessionState::Idle);
    assert!(h.analytics.events().is_empty());
    assert!(h.collections.calls.lock().is_empty());
}

#[tokio::test]
async fn test_wallet_resolution_populates() {
    let wallet = Arc::new(ScriptedWallet::new(true));
    let h = harness(Some(wallet.clone()));
    let answer = wallet.expect_request();
    let reply = h.collections.expect(&address("0xw"));

    let outcome = h.controller.start("");
    assert_eq!(h.controller.state(), SessionState::ResolvingFromProvider);

    answer.send(Ok(address("0xw"))).unwrap();
    let dispatch = dispatched(awaited(outcome).await);
    reply.send(Ok(entries(&["a"]))).unwrap();
    dispatch.collections.await.unwrap();
    dispatch.investments.await.unwrap();

    assert_eq!(h.controller.state(), SessionState::Populated(address("0xw")));
    assert_eq!(
        h.analytics.events(),
        vec!["wallet_exists", "wallet_connected 0xw"]
    );
    let used = h.investments.connections.lock().clone();
    assert_eq!(used.len(), 1);
    assert_eq!(used[0].1, ConnectionKind::Injected);
}

#[tokio::test]
async fn test_wallet_rejection_falls_back_to_idle() {
    let wallet = Arc::new(ScriptedWallet::new(true));
    let h = harness(Some(wallet.clone()));
    let answer = wallet.expect_request();

    let outcome = h.controller.init(None);
    answer
        .send(Err(WalletError::Rejected("User rejected the request".to_string())))
        .unwrap();

    assert!(matches!(awaited(outcome).await, InitOutcome::Idle));
    assert_eq!(h.controller.state(), SessionState::Idle);
    assert_eq!(h.analytics.events(), vec!["wallet_exists_not_connected"]);
    assert!(h.collections.calls.lock().is_empty());
}

#[tokio::test]
async fn test_custom_address_supersedes_pending_wallet_request() {
    let wallet = Arc::new(ScriptedWallet::new(true));
    let h = harness(Some(wallet.clone()));
    let answer = wallet.expect_request();

    let wallet_outcome = h.controller.on_wallet_connected();
    let dispatch = dispatched(h.controller.on_custom_address(address("0xtyped")));

    answer.send(Ok(address("0xwallet"))).unwrap();
    assert!(matches!(awaited(wallet_outcome).await, InitOutcome::Superseded));

    assert_eq!(dispatch.address, address("0xtyped"));
    assert_eq!(h.controller.state(), SessionState::Populated(address("0xtyped")));
    dispatch.collections.await.unwrap();
    assert_eq!(
        *h.collections.calls.lock(),
        vec![address("0xtyped")]
    );
    assert_eq!(
        h.history.events(),
        vec!["push None ./", "push Some(\"0xtyped\") ?address=0xtyped"]
    );
}

#[tokio::test]
async fn test_navigation_replays_without_pushing_history() {
    let h = harness(None);

    dispatched(h.controller.on_custom_address(address("0x1")));
    dispatched(h.controller.on_navigate(Some(NavigationEntry::for_address(address("0x2")))));
    assert_eq!(h.controller.state(), SessionState::Populated(address("0x2")));

    assert!(matches!(h.controller.on_navigate(None), InitOutcome::Idle));
    assert!(matches!(
        h.controller.on_navigate(Some(NavigationEntry::root())),
        InitOutcome::Idle
    ));
    assert_eq!(h.controller.state(), SessionState::Idle);
    assert_eq!(h.history.events().len(), 1);
}

#[tokio::test]
async fn test_fetch_failure_leaves_controller_usable() {
    let h = harness(None);
    let reply = h.collections.expect(&address("0x1"));

    let dispatch = dispatched(h.controller.init(Some(address("0x1"))));
    reply.send(Err(FetchError::Provider("502 Bad Gateway".to_string()))).unwrap();
    assert!(matches!(
        dispatch.collections.await.unwrap(),
        Settlement::Failed(_)
    ));
    assert!(matches!(h.controller.collections().status(), Status::Failed(_)));

    let reply = h.collections.expect(&address("0x1"));
    let dispatch = dispatched(h.controller.init(Some(address("0x1"))));
    reply.send(Ok(entries(&["a"]))).unwrap();
    assert_eq!(dispatch.collections.await.unwrap(), Settlement::Applied);
    assert_eq!(h.controller.collections().get_visible().len(), 1);
}

#[tokio::test]
async fn test_connection_reused_until_kind_changes() {
    let wallet = Arc::new(ScriptedWallet::new(false));
    let h = harness(Some(wallet.clone()));

    let first = dispatched(h.controller.init(Some(address("0x1"))));
    first.investments.await.unwrap();
    let second = dispatched(h.controller.init(Some(address("0x2"))));
    second.investments.await.unwrap();

    wallet.available.store(true, Ordering::SeqCst);
    let third = dispatched(h.controller.init(Some(address("0x3"))));
    third.investments.await.unwrap();

    let used = h.investments.connections.lock().clone();
    assert_eq!(used[0], used[1]);
    assert_eq!(used[0].1, ConnectionKind::Network);
    assert_ne!(used[2].0, used[0].0);
    assert_eq!(used[2].1, ConnectionKind::Injected);
}

#[tokio::test]
async fn test_run_processes_actions_in_order() {
    let h = harness(None);
    let (tx, rx) = action_channel();

    tx.send(UserAction::SubmitAddress(address("0x1"))).await.unwrap();
    tx.send(UserAction::SubmitAddress(address("0x2"))).await.unwrap();
    tx.send(UserAction::Navigate(Some(NavigationEntry::for_address(address("0x1")))))
        .await
        .unwrap();
    drop(tx);

    Arc::clone(&h.controller).run(rx).await;

    assert_eq!(h.controller.state(), SessionState::Populated(address("0x1")));
    assert_eq!(h.history.events().len(), 2);
}
