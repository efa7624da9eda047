//! Shared application state.

use crate::config::Config;
use std::sync::Arc;
use tradewatch_core::{
    ActionDispatcher, DashboardService, ModalService, ModelConfigProvider, UpstreamClient,
};

/// Shared application state.
pub struct AppState {
    pub dashboard: Arc<DashboardService>,
    pub conversations: Arc<ModalService>,
    pub actions: Arc<ActionDispatcher>,
    pub models: Arc<dyn ModelConfigProvider>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let upstream = Arc::new(UpstreamClient::new(config.upstream_url.clone()));
        let dashboard = Arc::new(DashboardService::new(upstream.clone(), config.page_size));
        let conversations = Arc::new(ModalService::new(upstream.clone(), config.display_offset()));
        let actions = Arc::new(ActionDispatcher::new(upstream.clone(), dashboard.clone()));
        Self {
            dashboard,
            conversations,
            actions,
            models: upstream,
            config,
        }
    }

    /// Assemble state from pre-built services. Used by integration tests to
    /// swap in mock providers.
    pub fn with_services(
        config: Config,
        dashboard: Arc<DashboardService>,
        conversations: Arc<ModalService>,
        actions: Arc<ActionDispatcher>,
        models: Arc<dyn ModelConfigProvider>,
    ) -> Self {
        Self {
            dashboard,
            conversations,
            actions,
            models,
            config,
        }
    }
}
