//! Investment statistics state. Plain container, no overrides.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use shared::InvestmentStats;

use super::container::{PendingHandle, StateContainer, Status, SubscriptionId, Update};
use crate::core::error::FetchError;

pub struct InvestmentsState {
    container: Arc<StateContainer<InvestmentStats>>,
}

impl InvestmentsState {
    pub fn new(fetch_timeout: Duration) -> Self {
        Self {
            container: Arc::new(StateContainer::new("investments", fetch_timeout)),
        }
    }

    pub fn container(&self) -> &Arc<StateContainer<InvestmentStats>> {
        &self.container
    }

    pub fn set_pending<F>(&self, fetch: F) -> PendingHandle
    where
        F: Future<Output = Result<InvestmentStats, FetchError>> + Send + 'static,
    {
        self.container.set_pending(fetch)
    }

    pub fn set_resolved(&self, stats: InvestmentStats) {
        self.container.set_resolved(stats)
    }

    pub fn get(&self) -> Option<InvestmentStats> {
        self.container.get()
    }

    pub fn status(&self) -> Status {
        self.container.status()
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Update<InvestmentStats>) + Send + Sync + 'static,
    {
        self.container.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.container.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Address;

    #[tokio::test]
    async fn test_pending_stats_resolve() {
        let state = InvestmentsState::new(Duration::from_secs(5));
        let address = Address::parse("0xabc").unwrap();
        let stats = InvestmentStats::from_trades(address, &[], Some(1.5));

        let expected = stats.clone();
        state.set_pending(async move { Ok(stats) }).await.unwrap();

        assert_eq!(state.get(), Some(expected));
        assert_eq!(state.status(), Status::Ready);
    }
}
