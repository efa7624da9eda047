//! Flag cross-referencing: match flagged-message annotations against a
//! transcript for inline highlighting.

use serde::Serialize;
use tradewatch_types::{FlaggedMessageDetail, Message};

/// Detail rendered next to a flagged message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlagAnnotation {
    pub detection_type: String,
    /// Exactly one of reason / indicator / negotiation_text, already chosen.
    pub display_text: Option<String>,
    pub fraud_type: Option<String>,
}

impl From<&FlaggedMessageDetail> for FlagAnnotation {
    fn from(detail: &FlaggedMessageDetail) -> Self {
        FlagAnnotation {
            detection_type: detail.detection_type.clone(),
            display_text: detail.display_text().map(str::to_string),
            fraud_type: detail.fraud_type.clone(),
        }
    }
}

/// One transcript message with its flag/trigger markers resolved.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedMessage {
    #[serde(flatten)]
    pub message: Message,
    pub is_flagged: bool,
    pub is_trigger: bool,
    /// Present only when flagged AND a detail object exists for the id. A
    /// flagged message without a matching detail stays flagged with no detail.
    pub flag: Option<FlagAnnotation>,
}

/// Annotate every message: flag membership, first matching detail, trigger
/// marker. Flagged and trigger are independent; a message may be both.
pub fn annotate(
    messages: &[Message],
    flagged_ids: &[String],
    details: &[FlaggedMessageDetail],
    trigger_id: Option<&str>,
) -> Vec<AnnotatedMessage> {
    messages
        .iter()
        .map(|msg| {
            let is_flagged = flagged_ids.iter().any(|id| id == &msg.id);
            let flag = if is_flagged {
                details
                    .iter()
                    .find(|d| d.msg_id == msg.id)
                    .map(FlagAnnotation::from)
            } else {
                None
            };
            AnnotatedMessage {
                message: msg.clone(),
                is_flagged,
                is_trigger: trigger_id == Some(msg.id.as_str()),
                flag,
            }
        })
        .collect()
}

/// One entry in the flagged-message summary panel.
#[derive(Debug, Clone, Serialize)]
pub struct FlagSummaryEntry {
    pub msg_id: String,
    pub detection_type: String,
    pub display_text: Option<String>,
    pub fraud_type: Option<String>,
}

/// Summary list keyed by the ordered flagged ids: one entry per id, with an
/// empty detail when no detail object was supplied for it.
pub fn flag_summary(
    flagged_ids: &[String],
    details: &[FlaggedMessageDetail],
) -> Vec<FlagSummaryEntry> {
    flagged_ids
        .iter()
        .map(|id| match details.iter().find(|d| &d.msg_id == id) {
            Some(detail) => FlagSummaryEntry {
                msg_id: id.clone(),
                detection_type: detail.detection_type.clone(),
                display_text: detail.display_text().map(str::to_string),
                fraud_type: detail.fraud_type.clone(),
            },
            None => FlagSummaryEntry {
                msg_id: id.clone(),
                detection_type: String::new(),
                display_text: None,
                fraud_type: None,
            },
        })
        .collect()
}
