//! Async service around the pagination controller.
//!
//! The controller itself is synchronous; this wrapper performs the
//! issue-fetch-apply dance around the provider call, holding the lock only on
//! either side of the await so overlapping requests can genuinely race (and be
//! resolved by the supersede token).

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::warn;

use crate::dashboard::{DashboardController, FetchTicket, LoadState};
use crate::provider::ResultsProvider;
use crate::stats::normalize_dashboard;
use crate::taxonomy::{FilterTab, filter_tabs};
use crate::view::{ResultView, result_view};
use tradewatch_types::{FilterState, FilterType, Stats};

/// Serializable snapshot of the dashboard for the JSON surface.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    #[serde(flatten)]
    pub state: LoadState,
    pub filter: FilterState,
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
    pub total_filtered_results: u64,
    pub total_stored_chats: u64,
    pub unanalyzed_chats: u64,
    pub stats: Stats,
    pub tabs: Vec<FilterTab>,
    pub results: Vec<ResultView>,
}

pub struct DashboardService {
    controller: RwLock<DashboardController>,
    provider: Arc<dyn ResultsProvider>,
}

impl DashboardService {
    pub fn new(provider: Arc<dyn ResultsProvider>, page_size: u32) -> Self {
        Self {
            controller: RwLock::new(DashboardController::new(page_size)),
            provider,
        }
    }

    async fn run(&self, ticket: FetchTicket) {
        let result = self
            .provider
            .fetch_dashboard(
                ticket.filter.page,
                ticket.filter.page_size,
                ticket.filter.filter_type,
            )
            .await;
        let mut ctrl = self.controller.write().await;
        match result {
            Ok(resp) => {
                ctrl.apply_success(ticket.token, normalize_dashboard(resp));
            }
            Err(err) => {
                warn!(target: "tradewatch::dashboard", error = %err, "dashboard fetch failed");
                ctrl.apply_failure(ticket.token, err.to_string());
            }
        }
    }

    pub async fn set_filter(&self, filter_type: FilterType) {
        let ticket = self.controller.write().await.request_filter(filter_type);
        self.run(ticket).await;
    }

    /// Returns false for an out-of-bounds page request (nothing dispatched).
    pub async fn set_page(&self, page: u32) -> bool {
        let ticket = self.controller.write().await.request_page(page);
        match ticket {
            Some(ticket) => {
                self.run(ticket).await;
                true
            }
            None => false,
        }
    }

    pub async fn set_page_size(&self, page_size: u32) {
        let ticket = self.controller.write().await.request_page_size(page_size);
        self.run(ticket).await;
    }

    /// Re-fetch at the current filter state (retry / cache invalidation).
    pub async fn refresh(&self) {
        let ticket = self.controller.write().await.request_refresh();
        self.run(ticket).await;
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let ctrl = self.controller.read().await;
        let filter = ctrl.filter_state();
        let total_pages = ctrl.total_pages();
        let data = ctrl.data();
        let stats = data.map(|d| d.stats.clone()).unwrap_or_default();
        DashboardSnapshot {
            state: ctrl.state().clone(),
            filter,
            total_pages,
            has_prev: filter.page > 1,
            has_next: filter.page < total_pages,
            total_filtered_results: data.map_or(0, |d| d.total_filtered_results),
            total_stored_chats: data.map_or(0, |d| d.total_stored_chats),
            unanalyzed_chats: data.map_or(0, |d| d.unanalyzed_chats),
            tabs: filter_tabs(&stats),
            results: data.map_or_else(Vec::new, |d| d.results.iter().map(result_view).collect()),
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use async_trait::async_trait;
    use tokio::sync::{Mutex, Notify, oneshot};
    use tradewatch_types::{DashboardResponse, StatsWire};

    fn response(total_pages: u32, total_filtered: u64) -> DashboardResponse {
        DashboardResponse {
            stats: StatsWire::default(),
            total_stored_chats: 0,
            unanalyzed_chats: 0,
            results: Vec::new(),
            current_page: 1,
            total_pages,
            total_filtered_results: total_filtered,
        }
    }

    struct PendingCall {
        filter_type: FilterType,
        page: u32,
        tx: oneshot::Sender<Result<DashboardResponse>>,
    }

    /// Provider whose calls block until the test resolves them, in any order.
    #[derive(Default)]
    struct GatedProvider {
        pending: Mutex<Vec<PendingCall>>,
        arrived: Notify,
    }

    impl GatedProvider {
        async fn wait_for_calls(&self, n: usize) {
            loop {
                if self.pending.lock().await.len() >= n {
                    return;
                }
                self.arrived.notified().await;
            }
        }

        async fn resolve(&self, index: usize, result: Result<DashboardResponse>) {
            let call = self.pending.lock().await.remove(index);
            let _ = call.tx.send(result);
        }

        async fn call(&self, index: usize) -> (FilterType, u32) {
            let pending = self.pending.lock().await;
            (pending[index].filter_type, pending[index].page)
        }
    }

    #[async_trait]
    impl ResultsProvider for GatedProvider {
        async fn fetch_dashboard(
            &self,
            page: u32,
            _limit_per_page: u32,
            filter_type: FilterType,
        ) -> Result<DashboardResponse> {
            let (tx, rx) = oneshot::channel();
            self.pending.lock().await.push(PendingCall {
                filter_type,
                page,
                tx,
            });
            self.arrived.notify_waiters();
            rx.await.expect("test dropped the call")
        }
    }

    /// Provider that answers immediately with a fixed page count.
    struct InstantProvider(u32);

    #[async_trait]
    impl ResultsProvider for InstantProvider {
        async fn fetch_dashboard(
            &self,
            _page: u32,
            _limit_per_page: u32,
            _filter_type: FilterType,
        ) -> Result<DashboardResponse> {
            Ok(response(self.0, 42))
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_refresh_reaches_ready() {
        let service = DashboardService::new(Arc::new(InstantProvider(3)), 25);
        service.refresh().await;
        let snap = service.snapshot().await;
        assert_eq!(snap.state, LoadState::Ready);
        assert_eq!(snap.total_pages, 3);
        assert_eq!(snap.total_filtered_results, 42);
        assert!(!snap.has_prev);
        assert!(snap.has_next);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_out_of_bounds_page_not_dispatched() {
        let service = DashboardService::new(Arc::new(InstantProvider(2)), 25);
        service.refresh().await;
        assert!(!service.set_page(3).await);
        assert!(!service.set_page(0).await);
        let snap = service.snapshot().await;
        assert_eq!(snap.filter.page, 1);
    }

    // Rapid filter change from all (page 2) to fraud (page 1): only the
    // fraud/page-1 result may be displayed, regardless of resolution order.
    #[tokio::test(flavor = "multi_thread")]
    async fn test_rapid_filter_change_newest_wins() {
        for newest_resolves_first in [true, false] {
            let provider = Arc::new(GatedProvider::default());
            let service = Arc::new(DashboardService::new(provider.clone(), 25));

            // Seed: ready on all/page 2 of 3.
            let seed = {
                let service = service.clone();
                tokio::spawn(async move { service.refresh().await })
            };
            provider.wait_for_calls(1).await;
            provider.resolve(0, Ok(response(3, 60))).await;
            seed.await.unwrap();

            let page_change = {
                let service = service.clone();
                tokio::spawn(async move { service.set_page(2).await })
            };
            provider.wait_for_calls(1).await;
            assert_eq!(provider.call(0).await, (FilterType::All, 2));

            // Before the page-2 fetch resolves, switch to fraud.
            let filter_change = {
                let service = service.clone();
                tokio::spawn(async move { service.set_filter(FilterType::Fraud).await })
            };
            provider.wait_for_calls(2).await;
            assert_eq!(provider.call(1).await, (FilterType::Fraud, 1));

            if newest_resolves_first {
                provider.resolve(1, Ok(response(1, 5))).await;
                provider.resolve(0, Ok(response(3, 60))).await;
            } else {
                provider.resolve(0, Ok(response(3, 60))).await;
                provider.resolve(0, Ok(response(1, 5))).await;
            }
            page_change.await.unwrap();
            filter_change.await.unwrap();

            let snap = service.snapshot().await;
            assert_eq!(snap.state, LoadState::Ready);
            assert_eq!(snap.filter.filter_type, FilterType::Fraud);
            assert_eq!(snap.filter.page, 1);
            assert_eq!(snap.total_filtered_results, 5);
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failure_surfaces_error_and_retry_recovers() {
        let provider = Arc::new(GatedProvider::default());
        let service = Arc::new(DashboardService::new(provider.clone(), 25));

        let fetch = {
            let service = service.clone();
            tokio::spawn(async move { service.refresh().await })
        };
        provider.wait_for_calls(1).await;
        provider
            .resolve(0, Err(crate::TradewatchError::Upstream("down".into())))
            .await;
        fetch.await.unwrap();
        let snap = service.snapshot().await;
        assert!(matches!(snap.state, LoadState::Error { .. }));

        let retry = {
            let service = service.clone();
            tokio::spawn(async move { service.refresh().await })
        };
        provider.wait_for_calls(1).await;
        provider.resolve(0, Ok(response(1, 1))).await;
        retry.await.unwrap();
        assert_eq!(service.snapshot().await.state, LoadState::Ready);
    }
}
