//! Analysis records produced by the conversation-classification service.
//!
//! The upstream service has shipped two incompatible record shapes: a legacy
//! camelCase variant without fraud fields and the current snake_case variant.
//! The snake_case + fraud shape is canonical here; the legacy variant is
//! adapted into it in one step at deserialization so nothing downstream has to
//! probe for field presence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A detection category. Wholesale and export are scored on 0-5, the rest on 0-10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionCategory {
    Wholesale,
    Export,
    Exit,
    PriceNegotiation,
    Fraud,
}

impl DetectionCategory {
    /// Categories in fixed display order.
    pub const ALL: [DetectionCategory; 5] = [
        DetectionCategory::Wholesale,
        DetectionCategory::Export,
        DetectionCategory::Exit,
        DetectionCategory::PriceNegotiation,
        DetectionCategory::Fraud,
    ];

    /// Upper bound of the category's score scale.
    pub fn scale_max(self) -> u8 {
        match self {
            DetectionCategory::Wholesale | DetectionCategory::Export => 5,
            DetectionCategory::Exit
            | DetectionCategory::PriceNegotiation
            | DetectionCategory::Fraud => 10,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DetectionCategory::Wholesale => "Wholesale",
            DetectionCategory::Export => "Export",
            DetectionCategory::Exit => "Platform exit",
            DetectionCategory::PriceNegotiation => "Price negotiation",
            DetectionCategory::Fraud => "Fraud",
        }
    }
}

/// Human review verdict on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackVerdict {
    Confirm,
    Reject,
}

/// Per-flag metadata attached to a flagged message id.
///
/// At most one of `reason` / `indicator` / `negotiation_text` is rendered, in
/// that priority order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlaggedMessageDetail {
    pub msg_id: String,
    #[serde(default)]
    pub detection_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negotiation_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraud_type: Option<String>,
}

impl FlaggedMessageDetail {
    /// The single text fragment to render for this flag, if any.
    pub fn display_text(&self) -> Option<&str> {
        self.reason
            .as_deref()
            .or(self.indicator.as_deref())
            .or(self.negotiation_text.as_deref())
    }
}

/// One detection outcome for one stored chat, in the canonical shape.
///
/// The boolean is the authoritative gate for "detected"; the score is
/// informational and may be nonzero while the boolean is false.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: i64,
    pub stored_chat_id: i64,
    pub conversation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_message_id: Option<String>,
    #[serde(default)]
    pub trigger_message: String,

    #[serde(alias = "is_wholesale_detected_by_gpt")]
    pub is_wholesale_detected: bool,
    #[serde(alias = "is_export_detected_by_gpt")]
    pub is_export_detected: bool,
    #[serde(alias = "is_exit_detected_by_gpt")]
    pub is_exit_detected: bool,
    #[serde(alias = "is_price_negotiation_detected_by_gpt")]
    pub is_price_negotiation_detected: bool,
    #[serde(default, alias = "is_fraud_detected_by_gpt")]
    pub is_fraud_detected: bool,

    #[serde(default, alias = "wholesale_detection_score_gpt")]
    pub wholesale_score: u8,
    #[serde(default, alias = "export_detection_score_gpt")]
    pub export_score: u8,
    #[serde(default, alias = "exit_detection_score_gpt")]
    pub exit_score: u8,
    #[serde(default, alias = "price_negotiation_score_gpt")]
    pub price_negotiation_score: u8,
    #[serde(default, alias = "fraud_detection_score_gpt")]
    pub fraud_score: u8,

    #[serde(default, alias = "gpt_explanation", skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub analyzed_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub human_feedback: Option<FeedbackVerdict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_reason: Option<String>,

    #[serde(default)]
    pub flagged_message_ids: Vec<String>,
    #[serde(default)]
    pub flagged_messages_details: Vec<FlaggedMessageDetail>,
}

impl AnalysisRecord {
    /// Whether the category's boolean gate is set.
    pub fn is_detected(&self, category: DetectionCategory) -> bool {
        match category {
            DetectionCategory::Wholesale => self.is_wholesale_detected,
            DetectionCategory::Export => self.is_export_detected,
            DetectionCategory::Exit => self.is_exit_detected,
            DetectionCategory::PriceNegotiation => self.is_price_negotiation_detected,
            DetectionCategory::Fraud => self.is_fraud_detected,
        }
    }

    pub fn score(&self, category: DetectionCategory) -> u8 {
        match category {
            DetectionCategory::Wholesale => self.wholesale_score,
            DetectionCategory::Export => self.export_score,
            DetectionCategory::Exit => self.exit_score,
            DetectionCategory::PriceNegotiation => self.price_negotiation_score,
            DetectionCategory::Fraud => self.fraud_score,
        }
    }

    /// Detected categories in fixed display order.
    pub fn detected_categories(&self) -> Vec<DetectionCategory> {
        DetectionCategory::ALL
            .into_iter()
            .filter(|c| self.is_detected(*c))
            .collect()
    }

    /// Number of simultaneously detected categories.
    pub fn detection_count(&self) -> usize {
        DetectionCategory::ALL
            .into_iter()
            .filter(|c| self.is_detected(*c))
            .count()
    }
}

/// Legacy camelCase record shape (pre-fraud backend versions).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAnalysisRecord {
    pub id: i64,
    pub stored_chat_id: i64,
    pub conversation_id: String,
    #[serde(default)]
    pub triggering_message: String,
    pub is_wholesale_detected_by_gpt: bool,
    pub is_export_detected_by_gpt: bool,
    pub is_exit_detected_by_gpt: bool,
    pub is_price_negotiation_detected_by_gpt: bool,
    #[serde(default)]
    pub wholesale_detection_score_gpt: u8,
    #[serde(default)]
    pub export_detection_score_gpt: u8,
    #[serde(default)]
    pub exit_detection_score_gpt: u8,
    #[serde(default)]
    pub price_negotiation_score_gpt: u8,
    #[serde(default)]
    pub gpt_explanation: Option<String>,
    pub analyzed_at: DateTime<Utc>,
    #[serde(default)]
    pub human_feedback_confirms_gpt: Option<bool>,
    #[serde(default)]
    pub human_feedback_reason: Option<String>,
}

impl From<LegacyAnalysisRecord> for AnalysisRecord {
    fn from(legacy: LegacyAnalysisRecord) -> Self {
        AnalysisRecord {
            id: legacy.id,
            stored_chat_id: legacy.stored_chat_id,
            conversation_id: legacy.conversation_id,
            trigger_message_id: None,
            trigger_message: legacy.triggering_message,
            is_wholesale_detected: legacy.is_wholesale_detected_by_gpt,
            is_export_detected: legacy.is_export_detected_by_gpt,
            is_exit_detected: legacy.is_exit_detected_by_gpt,
            is_price_negotiation_detected: legacy.is_price_negotiation_detected_by_gpt,
            is_fraud_detected: false,
            wholesale_score: legacy.wholesale_detection_score_gpt,
            export_score: legacy.export_detection_score_gpt,
            exit_score: legacy.exit_detection_score_gpt,
            price_negotiation_score: legacy.price_negotiation_score_gpt,
            fraud_score: 0,
            explanation: legacy.gpt_explanation,
            analyzed_at: legacy.analyzed_at,
            human_feedback: legacy.human_feedback_confirms_gpt.map(|confirmed| {
                if confirmed {
                    FeedbackVerdict::Confirm
                } else {
                    FeedbackVerdict::Reject
                }
            }),
            feedback_reason: legacy.human_feedback_reason,
            flagged_message_ids: Vec::new(),
            flagged_messages_details: Vec::new(),
        }
    }
}

/// Wire-level record that accepts either shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnalysisRecordWire {
    Canonical(AnalysisRecord),
    Legacy(LegacyAnalysisRecord),
}

impl AnalysisRecordWire {
    pub fn into_canonical(self) -> AnalysisRecord {
        match self {
            AnalysisRecordWire::Canonical(record) => record,
            AnalysisRecordWire::Legacy(legacy) => legacy.into(),
        }
    }
}
