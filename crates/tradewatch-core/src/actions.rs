//! Action dispatcher: the four analysis commands plus feedback submission.
//!
//! Each command has its own tagged lifecycle state so commands can run
//! concurrently without clobbering each other's flags. A command that
//! succeeds upstream invalidates the cached dashboard (full re-fetch at the
//! current filter state) rather than patching it incrementally.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::provider::CommandClient;
use crate::service::DashboardService;
use crate::{Result, TradewatchError};
use tradewatch_types::{FeedbackVerdict, FraudAnalysisOutcome};

/// The dispatchable commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    FetchChats,
    AnalyzeChats,
    ResetAnalysis,
    AnalyzeFraud,
    SubmitFeedback,
}

impl CommandKind {
    pub const ALL: [CommandKind; 5] = [
        CommandKind::FetchChats,
        CommandKind::AnalyzeChats,
        CommandKind::ResetAnalysis,
        CommandKind::AnalyzeFraud,
        CommandKind::SubmitFeedback,
    ];

    fn name(self) -> &'static str {
        match self {
            CommandKind::FetchChats => "fetch-chats",
            CommandKind::AnalyzeChats => "analyze-chats",
            CommandKind::ResetAnalysis => "reset-analysis",
            CommandKind::AnalyzeFraud => "analyze-fraud",
            CommandKind::SubmitFeedback => "submit-feedback",
        }
    }

    /// Command-specific limit ceiling, for commands that take one.
    pub fn limit_ceiling(self) -> Option<u32> {
        match self {
            CommandKind::FetchChats => Some(500_000),
            CommandKind::AnalyzeChats => Some(1_000),
            CommandKind::AnalyzeFraud => Some(100),
            CommandKind::ResetAnalysis | CommandKind::SubmitFeedback => None,
        }
    }
}

/// Lifecycle of one command, tagged rather than a shared boolean flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CommandState {
    Idle,
    Pending,
    Succeeded,
    Failed { error: String },
}

pub struct ActionDispatcher {
    client: Arc<dyn CommandClient>,
    dashboard: Arc<DashboardService>,
    states: DashMap<CommandKind, CommandState>,
    /// Last fraud outcome, shown once as a transient result set.
    last_fraud: RwLock<Option<FraudAnalysisOutcome>>,
}

impl ActionDispatcher {
    pub fn new(client: Arc<dyn CommandClient>, dashboard: Arc<DashboardService>) -> Self {
        let states = DashMap::new();
        for kind in CommandKind::ALL {
            states.insert(kind, CommandState::Idle);
        }
        Self {
            client,
            dashboard,
            states,
            last_fraud: RwLock::new(None),
        }
    }

    /// Per-command lifecycle states, in stable order.
    pub fn states(&self) -> BTreeMap<CommandKind, CommandState> {
        CommandKind::ALL
            .into_iter()
            .map(|kind| {
                let state = self
                    .states
                    .get(&kind)
                    .map(|s| s.clone())
                    .unwrap_or(CommandState::Idle);
                (kind, state)
            })
            .collect()
    }

    pub async fn last_fraud_outcome(&self) -> Option<FraudAnalysisOutcome> {
        self.last_fraud.read().await.clone()
    }

    /// Validate a limit before dispatch; the command is not sent otherwise.
    fn validate_limit(kind: CommandKind, limit: i64) -> Result<u32> {
        let max = kind
            .limit_ceiling()
            .expect("validate_limit called for a limitless command");
        if limit < 1 || limit > i64::from(max) {
            return Err(TradewatchError::InvalidLimit {
                command: kind.name(),
                given: limit,
                max,
            });
        }
        Ok(limit as u32)
    }

    fn set_state(&self, kind: CommandKind, state: CommandState) {
        self.states.insert(kind, state);
    }

    /// Record the outcome and, on success, invalidate the cached dashboard.
    async fn finish<T>(&self, kind: CommandKind, result: &Result<T>) {
        match result {
            Ok(_) => {
                info!(target: "tradewatch::actions", command = kind.name(), "command succeeded");
                self.set_state(kind, CommandState::Succeeded);
                self.dashboard.refresh().await;
            }
            Err(err) => {
                warn!(target: "tradewatch::actions", command = kind.name(), error = %err, "command failed");
                self.set_state(
                    kind,
                    CommandState::Failed {
                        error: err.to_string(),
                    },
                );
            }
        }
    }

    pub async fn fetch_chats(&self, limit: i64) -> Result<()> {
        let limit = Self::validate_limit(CommandKind::FetchChats, limit)?;
        self.set_state(CommandKind::FetchChats, CommandState::Pending);
        let result = self.client.fetch_and_store_chats(limit).await;
        self.finish(CommandKind::FetchChats, &result).await;
        result
    }

    pub async fn analyze_chats(&self, limit: i64) -> Result<()> {
        let limit = Self::validate_limit(CommandKind::AnalyzeChats, limit)?;
        self.set_state(CommandKind::AnalyzeChats, CommandState::Pending);
        let result = self.client.analyze_stored_chats(limit).await;
        self.finish(CommandKind::AnalyzeChats, &result).await;
        result
    }

    /// Requires explicit confirmation; rejected before dispatch without it.
    pub async fn reset_analysis(&self, confirmed: bool) -> Result<()> {
        if !confirmed {
            return Err(TradewatchError::ConfirmationRequired);
        }
        self.set_state(CommandKind::ResetAnalysis, CommandState::Pending);
        let result = self.client.reset_analysis().await;
        self.finish(CommandKind::ResetAnalysis, &result).await;
        result
    }

    pub async fn analyze_fraud(&self, limit: i64) -> Result<FraudAnalysisOutcome> {
        let limit = Self::validate_limit(CommandKind::AnalyzeFraud, limit)?;
        self.set_state(CommandKind::AnalyzeFraud, CommandState::Pending);
        let result = self.client.analyze_fraud(limit).await;
        if let Ok(outcome) = &result {
            *self.last_fraud.write().await = Some(outcome.clone());
        }
        self.finish(CommandKind::AnalyzeFraud, &result).await;
        result
    }

    pub async fn submit_feedback(
        &self,
        result_id: i64,
        verdict: FeedbackVerdict,
        reason: Option<String>,
    ) -> Result<()> {
        self.set_state(CommandKind::SubmitFeedback, CommandState::Pending);
        let result = self
            .client
            .submit_feedback(result_id, verdict, reason)
            .await;
        self.finish(CommandKind::SubmitFeedback, &result).await;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ResultsProvider;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;
    use tradewatch_types::{DashboardResponse, FilterType, FraudBatchStats, StatsWire};

    /// Results provider that counts its fetches.
    #[derive(Default)]
    struct CountingResults {
        fetches: AtomicUsize,
        last_filter: Mutex<Option<FilterType>>,
    }

    #[async_trait]
    impl ResultsProvider for CountingResults {
        async fn fetch_dashboard(
            &self,
            _page: u32,
            _limit_per_page: u32,
            filter_type: FilterType,
        ) -> Result<DashboardResponse> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            *self.last_filter.lock().await = Some(filter_type);
            Ok(DashboardResponse {
                stats: StatsWire::default(),
                total_stored_chats: 0,
                unanalyzed_chats: 0,
                results: Vec::new(),
                current_page: 1,
                total_pages: 1,
                total_filtered_results: 0,
            })
        }
    }

    struct StubCommands {
        fail: bool,
    }

    #[async_trait]
    impl CommandClient for StubCommands {
        async fn fetch_and_store_chats(&self, _limit: u32) -> Result<()> {
            if self.fail {
                Err(TradewatchError::Upstream("rejected".into()))
            } else {
                Ok(())
            }
        }
        async fn analyze_stored_chats(&self, _limit: u32) -> Result<()> {
            Ok(())
        }
        async fn reset_analysis(&self) -> Result<()> {
            Ok(())
        }
        async fn analyze_fraud(&self, _limit: u32) -> Result<FraudAnalysisOutcome> {
            Ok(FraudAnalysisOutcome {
                status: "ok".into(),
                message: "done".into(),
                stats: FraudBatchStats {
                    total_reports: 4,
                    analyzed: 4,
                    fraud_detected: 1,
                    detection_rate: 25.0,
                },
                fraud_cases: Vec::new(),
            })
        }
        async fn submit_feedback(
            &self,
            _result_id: i64,
            _verdict: FeedbackVerdict,
            _reason: Option<String>,
        ) -> Result<()> {
            Ok(())
        }
    }

    fn dispatcher(fail: bool) -> (ActionDispatcher, Arc<CountingResults>) {
        let results = Arc::new(CountingResults::default());
        let dashboard = Arc::new(DashboardService::new(results.clone(), 25));
        let dispatcher =
            ActionDispatcher::new(Arc::new(StubCommands { fail }), dashboard);
        (dispatcher, results)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_limit_ceilings_enforced_before_dispatch() {
        let (dispatcher, results) = dispatcher(false);
        assert!(dispatcher.fetch_chats(0).await.is_err());
        assert!(dispatcher.fetch_chats(500_001).await.is_err());
        assert!(dispatcher.analyze_chats(1_001).await.is_err());
        assert!(dispatcher.analyze_fraud(101).await.is_err());
        assert!(dispatcher.analyze_fraud(-5).await.is_err());
        // Nothing dispatched, so no dashboard invalidation happened.
        assert_eq!(results.fetches.load(Ordering::SeqCst), 0);
        // Rejected commands stay Idle.
        let states = dispatcher.states();
        assert_eq!(states[&CommandKind::FetchChats], CommandState::Idle);
        assert_eq!(states[&CommandKind::AnalyzeFraud], CommandState::Idle);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_limit_bounds_inclusive() {
        let (dispatcher, _) = dispatcher(false);
        assert!(dispatcher.fetch_chats(500_000).await.is_ok());
        assert!(dispatcher.analyze_chats(1_000).await.is_ok());
        assert!(dispatcher.analyze_fraud(100).await.is_ok());
        assert!(dispatcher.fetch_chats(1).await.is_ok());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_success_invalidates_dashboard_at_current_filter() {
        let (dispatcher, results) = dispatcher(false);
        dispatcher.dashboard.set_filter(FilterType::Exit).await;
        let before = results.fetches.load(Ordering::SeqCst);
        dispatcher.fetch_chats(10).await.unwrap();
        assert_eq!(results.fetches.load(Ordering::SeqCst), before + 1);
        assert_eq!(
            *results.last_filter.lock().await,
            Some(FilterType::Exit),
            "re-fetch must use the current filter state"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failure_marks_failed_and_skips_invalidation() {
        let (dispatcher, results) = dispatcher(true);
        assert!(dispatcher.fetch_chats(10).await.is_err());
        assert_eq!(results.fetches.load(Ordering::SeqCst), 0);
        assert!(matches!(
            dispatcher.states()[&CommandKind::FetchChats],
            CommandState::Failed { .. }
        ));
        // Other commands are unaffected.
        assert_eq!(
            dispatcher.states()[&CommandKind::AnalyzeChats],
            CommandState::Idle
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_reset_requires_confirmation() {
        let (dispatcher, results) = dispatcher(false);
        let err = dispatcher.reset_analysis(false).await.unwrap_err();
        assert!(matches!(err, TradewatchError::ConfirmationRequired));
        assert_eq!(results.fetches.load(Ordering::SeqCst), 0);
        assert!(dispatcher.reset_analysis(true).await.is_ok());
        assert_eq!(results.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fraud_outcome_is_transient_not_stats() {
        let (dispatcher, _) = dispatcher(false);
        assert!(dispatcher.last_fraud_outcome().await.is_none());
        let outcome = dispatcher.analyze_fraud(50).await.unwrap();
        assert_eq!(outcome.stats.fraud_detected, 1);
        let kept = dispatcher.last_fraud_outcome().await.unwrap();
        assert_eq!(kept.stats.analyzed, 4);
        // The dashboard snapshot's stats come from the results provider and
        // are untouched by the fraud payload.
        let snap = dispatcher.dashboard.snapshot().await;
        assert_eq!(snap.stats.fraud_detected, 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_commands_track_independent_states() {
        let (dispatcher, _) = dispatcher(false);
        dispatcher.analyze_chats(5).await.unwrap();
        let states = dispatcher.states();
        assert_eq!(states[&CommandKind::AnalyzeChats], CommandState::Succeeded);
        assert_eq!(states[&CommandKind::FetchChats], CommandState::Idle);
        assert_eq!(states[&CommandKind::ResetAnalysis], CommandState::Idle);
    }
}
