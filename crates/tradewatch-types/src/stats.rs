//! Aggregate statistics over the analyzed population.
//!
//! Counts always come from the provider (they cover the full analyzed
//! population, not the current page). Percentages may be omitted on the wire;
//! the stats aggregator in `tradewatch-core` fills them in.

use serde::{Deserialize, Serialize};

use crate::{AnalysisRecord, AnalysisRecordWire};

/// Fully resolved statistics. Every percentage is in `[0, 100]` and defined as
/// 0 when its denominator is 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Records analyzed in the active filter scope, including records with no
    /// detected category.
    pub total_analyzed: u64,
    pub wholesale_count: u64,
    pub export_count: u64,
    pub exit_count: u64,
    pub price_negotiation_count: u64,
    /// Records with two or more simultaneously detected categories.
    pub combined_count: u64,
    pub wholesale_percentage: f64,
    pub export_percentage: f64,
    pub exit_percentage: f64,
    pub price_negotiation_percentage: f64,
    pub combined_percentage: f64,
    /// Fraud analysis runs as its own smaller batch: `fraud_detected` over
    /// `fraud_analyzed`, never over `total_analyzed`.
    pub fraud_detected: u64,
    pub fraud_analyzed: u64,
    pub fraud_detection_rate: f64,
}

/// Statistics as received from the provider. Percentage fields are optional;
/// `combined_count` may also be absent on older backends.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsWire {
    #[serde(default, alias = "total_analyzed_count")]
    pub total_analyzed: u64,
    #[serde(default)]
    pub wholesale_count: u64,
    #[serde(default)]
    pub export_count: u64,
    #[serde(default)]
    pub exit_count: u64,
    #[serde(default)]
    pub price_negotiation_count: u64,
    #[serde(default)]
    pub combined_count: Option<u64>,
    #[serde(default)]
    pub wholesale_percentage: Option<f64>,
    #[serde(default)]
    pub export_percentage: Option<f64>,
    #[serde(default)]
    pub exit_percentage: Option<f64>,
    #[serde(default)]
    pub price_negotiation_percentage: Option<f64>,
    #[serde(default)]
    pub combined_percentage: Option<f64>,
    #[serde(default)]
    pub fraud_detected: u64,
    #[serde(default)]
    pub fraud_analyzed: u64,
    #[serde(default)]
    pub fraud_detection_rate: Option<f64>,
}

/// One page of dashboard data as received from the Results Provider.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardResponse {
    #[serde(default)]
    pub stats: StatsWire,
    #[serde(default)]
    pub total_stored_chats: u64,
    #[serde(default)]
    pub unanalyzed_chats: u64,
    #[serde(default)]
    pub results: Vec<AnalysisRecordWire>,
    pub current_page: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub total_filtered_results: u64,
}

/// Normalized dashboard data: canonical records, resolved stats.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub stats: Stats,
    pub total_stored_chats: u64,
    pub unanalyzed_chats: u64,
    pub results: Vec<AnalysisRecord>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_filtered_results: u64,
}
