//! reqwest implementation of the provider traits against the analysis service.

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

use crate::provider::{CommandClient, ConversationProvider, ModelConfigProvider, ResultsProvider};
use crate::{Result, TradewatchError};
use tradewatch_types::{
    ConversationResponse, DashboardResponse, FeedbackVerdict, FilterType, FraudAnalysisOutcome,
    ModelConfig,
};

/// HTTP client for the upstream analysis service.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    base_url: String,
    http: Client,
}

impl UpstreamClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Promote non-2xx responses to an error that carries the body.
    async fn check(resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(TradewatchError::UpstreamStatus {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ResultsProvider for UpstreamClient {
    async fn fetch_dashboard(
        &self,
        page: u32,
        limit_per_page: u32,
        filter_type: FilterType,
    ) -> Result<DashboardResponse> {
        debug!(target: "tradewatch::upstream", page, limit_per_page, filter = filter_type.as_str(), "fetching dashboard page");
        let resp = self
            .http
            .get(self.url("/api/dashboard"))
            .query(&[
                ("page", page.to_string()),
                ("limit_per_page", limit_per_page.to_string()),
                ("filter_type", filter_type.as_str().to_string()),
            ])
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }
}

#[async_trait]
impl ConversationProvider for UpstreamClient {
    async fn fetch_conversation(&self, stored_chat_id: i64) -> Result<ConversationResponse> {
        debug!(target: "tradewatch::upstream", stored_chat_id, "fetching conversation");
        let resp = self
            .http
            .get(self.url(&format!("/api/conversation/{stored_chat_id}")))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }
}

#[async_trait]
impl CommandClient for UpstreamClient {
    async fn fetch_and_store_chats(&self, limit: u32) -> Result<()> {
        let resp = self
            .http
            .post(self.url("/fetch-and-store-chats"))
            .form(&[("limit", limit.to_string())])
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn analyze_stored_chats(&self, analysis_limit: u32) -> Result<()> {
        let resp = self
            .http
            .post(self.url("/analyze-stored-chats"))
            .form(&[("analysis_limit", analysis_limit.to_string())])
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn reset_analysis(&self) -> Result<()> {
        let resp = self.http.post(self.url("/reset-analysis")).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn analyze_fraud(&self, analysis_limit: u32) -> Result<FraudAnalysisOutcome> {
        let resp = self
            .http
            .post(self.url("/analyze-fraud"))
            .form(&[("analysis_limit", analysis_limit.to_string())])
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn submit_feedback(
        &self,
        result_id: i64,
        verdict: FeedbackVerdict,
        reason: Option<String>,
    ) -> Result<()> {
        let verdict = match verdict {
            FeedbackVerdict::Confirm => "confirm",
            FeedbackVerdict::Reject => "reject",
        };
        let mut form = vec![("feedback", verdict.to_string())];
        if let Some(reason) = reason {
            form.push(("reason", reason));
        }
        let resp = self
            .http
            .post(self.url(&format!("/submit-feedback/{result_id}")))
            .form(&form)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }
}

#[async_trait]
impl ModelConfigProvider for UpstreamClient {
    async fn model_config(&self) -> Result<ModelConfig> {
        let resp = self.http.get(self.url("/api/model-config")).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn set_model(&self, model: &str) -> Result<ModelConfig> {
        let resp = self
            .http
            .post(self.url("/api/model-config"))
            .json(&serde_json::json!({ "model": model }))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }
}
