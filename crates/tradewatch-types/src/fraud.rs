//! Structured payload returned by the analyze-fraud command.
//!
//! This is a transient result set shown once after the command completes; it
//! is never merged into the persistent [`Stats`](crate::Stats).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FraudBatchStats {
    pub total_reports: u64,
    pub analyzed: u64,
    pub fraud_detected: u64,
    pub detection_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspiciousMessage {
    pub message: String,
    pub created_at: String,
    pub patterns_found: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudCase {
    pub user_id: i64,
    pub entity_id: i64,
    pub conversation_id: i64,
    pub reason: String,
    /// Risk score on 0-10.
    pub score: u8,
    #[serde(default)]
    pub suspicious_messages: Vec<SuspiciousMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudAnalysisOutcome {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub stats: FraudBatchStats,
    #[serde(default)]
    pub fraud_cases: Vec<FraudCase>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_with_empty_cases() {
        let outcome: FraudAnalysisOutcome = serde_json::from_value(serde_json::json!({
            "status": "ok",
            "message": "no fraud found",
            "stats": {
                "total_reports": 12,
                "analyzed": 12,
                "fraud_detected": 0,
                "detection_rate": 0.0
            }
        }))
        .unwrap();
        assert!(outcome.fraud_cases.is_empty());
        assert_eq!(outcome.stats.analyzed, 12);
    }
}
