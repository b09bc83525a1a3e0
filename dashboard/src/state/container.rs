//! # Reactive State Container
//!
//! A value plus an ordered list of change subscribers. The value is either
//! assigned directly ([`StateContainer::set_resolved`]) or produced by a
//! future ([`StateContainer::set_pending`]) that runs on a tracked task.
//!
//! ## Supersession
//!
//! Every assignment bumps a per-container generation counter. A pending
//! future remembers the generation it was issued under and, when it settles,
//! is applied only if that generation is still the latest one:
//!
//! ```text
//! set_pending(f1)   generation 1
//! set_pending(f2)   generation 2
//! f2 settles        2 == 2  -> applied, subscribers notified
//! f1 settles        1 != 2  -> discarded silently
//! ```
//!
//! Completion order therefore never matters; only issue order does.
//!
//! ## Delivery
//!
//! Mutations that notify, and the notifications themselves, run under a
//! re-entrant delivery lock. Subscribers observe updates in the order the
//! mutations happened, may call back into the container (`get`, `subscribe`,
//! even `set_resolved`), and are each isolated: a panicking subscriber is
//! logged and the remaining subscribers still run.

use parking_lot::{ReentrantMutex, RwLock};
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::core::error::FetchError;
use crate::debug::spawn_tracked;

/// Notification delivered to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum Update<T> {
    /// A new authoritative value
    Resolved(T),
    /// The latest resolution failed; there is no current value
    Failed(FetchError),
}

impl<T> Update<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Update::Resolved(value) => Some(value),
            Update::Failed(_) => None,
        }
    }
}

/// Observable lifecycle of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Nothing assigned yet
    Empty,
    /// A pending future is authoritative and has not settled
    Loading,
    /// `current` holds the latest resolved value
    Ready,
    /// The authoritative future failed or timed out
    Failed(FetchError),
}

/// How a pending future ended, as reported by its join handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// Value applied and subscribers notified
    Applied,
    /// Failure recorded and subscribers notified
    Failed(FetchError),
    /// A newer assignment arrived first; the outcome was dropped
    Superseded,
}

/// Handle to the task driving a pending future.
pub type PendingHandle = JoinHandle<Settlement>;

/// Identifies a registered subscriber for [`StateContainer::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Arc<dyn Fn(&Update<T>) + Send + Sync>;

struct Inner<T> {
    current: Option<T>,
    status: Status,
    generation: u64,
}

/// Holder of a value, its pending resolution and its subscribers.
pub struct StateContainer<T> {
    name: &'static str,
    fetch_timeout: Duration,
    inner: RwLock<Inner<T>>,
    subscribers: RwLock<Vec<(SubscriptionId, Subscriber<T>)>>,
    next_subscription: AtomicU64,
    delivery: ReentrantMutex<()>,
}

impl<T> StateContainer<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an empty container.
    ///
    /// `name` labels logs and tracked tasks; `fetch_timeout` bounds every
    /// future handed to [`set_pending`](Self::set_pending).
    pub fn new(name: &'static str, fetch_timeout: Duration) -> Self {
        Self {
            name,
            fetch_timeout,
            inner: RwLock::new(Inner {
                current: None,
                status: Status::Empty,
                generation: 0,
            }),
            subscribers: RwLock::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
            delivery: ReentrantMutex::new(()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last resolved value, if any.
    pub fn get(&self) -> Option<T> {
        self.inner.read().current.clone()
    }

    /// Borrow the current value without cloning it.
    pub fn with_current<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        let inner = self.inner.read();
        f(inner.current.as_ref())
    }

    pub fn status(&self) -> Status {
        self.inner.read().status.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.read().status == Status::Loading
    }

    /// Replace the value, supersede any pending future and notify subscribers.
    pub fn set_resolved(&self, value: T) {
        let _delivery = self.delivery.lock();
        let generation = {
            let mut inner = self.inner.write();
            inner.generation += 1;
            inner.current = Some(value.clone());
            inner.status = Status::Ready;
            inner.generation
        };
        debug!(container = self.name, generation, "Value resolved directly");
        self.notify(&Update::Resolved(value));
    }

    /// Make `future` the authoritative source of the next value.
    ///
    /// The future runs on its own task under the container's timeout. When it
    /// settles it is applied only if no later `set_pending`/`set_resolved`
    /// happened in the meantime.
    pub fn set_pending<F>(self: &Arc<Self>, future: F) -> PendingHandle
    where
        F: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        self.set_pending_with(future, |value| value)
    }

    /// Like [`set_pending`](Self::set_pending), but the raw output is turned
    /// into the stored value by `finish`.
    ///
    /// `finish` runs only for a current, successful outcome and holds the
    /// delivery lock while it does, so it is serialized against
    /// [`exclusive`](Self::exclusive) sections and other settlements. It
    /// must not call back into the container.
    pub fn set_pending_with<F, R, P>(self: &Arc<Self>, future: F, finish: P) -> PendingHandle
    where
        F: Future<Output = Result<R, FetchError>> + Send + 'static,
        R: Send + 'static,
        P: FnOnce(R) -> T + Send + 'static,
    {
        let token = {
            let mut inner = self.inner.write();
            inner.generation += 1;
            inner.status = Status::Loading;
            inner.generation
        };
        debug!(container = self.name, generation = token, "Pending resolution registered");

        let container = Arc::clone(self);
        let timeout = self.fetch_timeout;
        spawn_tracked(self.name, async move {
            let outcome = match tokio::time::timeout(timeout, future).await {
                Ok(result) => result,
                Err(_) => Err(FetchError::Timeout(timeout)),
            };
            container.settle(token, outcome, finish)
        })
    }

    /// Run `f` while no settlement or notification can interleave.
    ///
    /// `f` may call back into the container.
    pub fn exclusive<R>(&self, f: impl FnOnce() -> R) -> R {
        let _delivery = self.delivery.lock();
        f()
    }

    /// Mutate the current value in place without notifying.
    ///
    /// Returns `None` when there is no value. Follow with
    /// [`emit_update`](Self::emit_update) to publish the change. `f` runs
    /// under the write lock and must not call back into the container.
    pub fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let _delivery = self.delivery.lock();
        let mut inner = self.inner.write();
        inner.current.as_mut().map(f)
    }

    /// Re-notify subscribers with the unchanged current value.
    pub fn emit_update(&self) {
        let _delivery = self.delivery.lock();
        let current = self.inner.read().current.clone();
        match current {
            Some(value) => self.notify(&Update::Resolved(value)),
            None => debug!(container = self.name, "emit_update with no value; nothing to send"),
        }
    }

    /// Register `callback` for every future update.
    ///
    /// If the container already holds a value (or a recorded failure) the
    /// callback is invoked once immediately with it.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Update<T>) + Send + Sync + 'static,
    {
        let _delivery = self.delivery.lock();
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        let callback: Subscriber<T> = Arc::new(callback);
        self.subscribers.write().push((id, Arc::clone(&callback)));

        let snapshot = {
            let inner = self.inner.read();
            match (&inner.current, &inner.status) {
                (Some(value), _) => Some(Update::Resolved(value.clone())),
                (None, Status::Failed(err)) => Some(Update::Failed(err.clone())),
                (None, _) => None,
            }
        };
        if let Some(update) = snapshot {
            self.invoke(&callback, &update);
        }
        id
    }

    /// Remove a subscriber. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    fn settle<R>(
        &self,
        token: u64,
        outcome: Result<R, FetchError>,
        finish: impl FnOnce(R) -> T,
    ) -> Settlement {
        let _delivery = self.delivery.lock();
        let update = {
            let mut inner = self.inner.write();
            if inner.generation != token {
                debug!(
                    container = self.name,
                    generation = token,
                    latest = inner.generation,
                    "Discarding superseded resolution"
                );
                return Settlement::Superseded;
            }
            match outcome.map(finish) {
                Ok(value) => {
                    inner.current = Some(value.clone());
                    inner.status = Status::Ready;
                    Update::Resolved(value)
                }
                Err(err) => {
                    inner.current = None;
                    inner.status = Status::Failed(err.clone());
                    Update::Failed(err)
                }
            }
        };

        let settlement = match &update {
            Update::Resolved(_) => {
                info!(container = self.name, generation = token, "Resolution applied");
                Settlement::Applied
            }
            Update::Failed(err) => {
                warn!(container = self.name, generation = token, error = %err, "Resolution failed");
                Settlement::Failed(err.clone())
            }
        };
        self.notify(&update);
        settlement
    }

    fn notify(&self, update: &Update<T>) {
        let subscribers: Vec<Subscriber<T>> = self
            .subscribers
            .read()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in &subscribers {
            self.invoke(callback, update);
        }
    }

    fn invoke(&self, callback: &Subscriber<T>, update: &Update<T>) {
        if let Err(payload) = catch_unwind(AssertUnwindSafe(|| callback(update))) {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!(container = self.name, message = %message, "Subscriber panicked");
        }
    }
}
