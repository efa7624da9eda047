//! Provider traits for the external services the dashboard consumes.
//!
//! Controllers only ever see these traits; the reqwest implementation lives in
//! [`crate::UpstreamClient`] and tests drive the controllers with mocks.

use async_trait::async_trait;

use crate::Result;
use tradewatch_types::{
    ConversationResponse, DashboardResponse, FeedbackVerdict, FilterType, FraudAnalysisOutcome,
    ModelConfig,
};

/// Paginated, filtered analysis records plus population-level statistics.
#[async_trait]
pub trait ResultsProvider: Send + Sync {
    async fn fetch_dashboard(
        &self,
        page: u32,
        limit_per_page: u32,
        filter_type: FilterType,
    ) -> Result<DashboardResponse>;
}

/// Full message transcript plus role/trigger metadata for one stored chat.
#[async_trait]
pub trait ConversationProvider: Send + Sync {
    async fn fetch_conversation(&self, stored_chat_id: i64) -> Result<ConversationResponse>;
}

/// Fire-and-forget command endpoints. Bodies are ignored except for
/// analyze-fraud, whose body is the transient fraud result set.
#[async_trait]
pub trait CommandClient: Send + Sync {
    async fn fetch_and_store_chats(&self, limit: u32) -> Result<()>;
    async fn analyze_stored_chats(&self, analysis_limit: u32) -> Result<()>;
    async fn reset_analysis(&self) -> Result<()>;
    async fn analyze_fraud(&self, analysis_limit: u32) -> Result<FraudAnalysisOutcome>;
    async fn submit_feedback(
        &self,
        result_id: i64,
        verdict: FeedbackVerdict,
        reason: Option<String>,
    ) -> Result<()>;
}

/// Read/write access to the upstream classifier model configuration.
#[async_trait]
pub trait ModelConfigProvider: Send + Sync {
    async fn model_config(&self) -> Result<ModelConfig>;
    async fn set_model(&self, model: &str) -> Result<ModelConfig>;
}
