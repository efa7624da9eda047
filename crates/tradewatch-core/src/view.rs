//! Renderable view-models composed from records and transcripts.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use crate::flags::{FlagSummaryEntry, annotate, flag_summary};
use crate::grouping::{MessageGroup, group_messages};
use crate::{Result, TradewatchError};
use tradewatch_types::{
    AnalysisRecord, ConversationResponse, DetectionCategory, FeedbackVerdict,
};

/// How many flagged messages a result card shows before collapsing to "+N more".
pub const FLAGGED_DISPLAY_CAP: usize = 3;

/// One detected-category chip: label, score, and the scale it is on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBadge {
    pub category: DetectionCategory,
    pub label: &'static str,
    pub score: u8,
    pub scale: u8,
}

/// Human-feedback marker on a result card.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackBadge {
    pub verdict: FeedbackVerdict,
    pub reason: Option<String>,
}

/// Truncated flagged-message list for a result card.
#[derive(Debug, Clone, Serialize)]
pub struct FlaggedPreview {
    pub entries: Vec<FlagSummaryEntry>,
    /// Count hidden behind the cap; render as "+N more" when nonzero.
    pub more: usize,
    pub total: usize,
}

/// One analysis record composed into a renderable summary.
#[derive(Debug, Clone, Serialize)]
pub struct ResultView {
    pub id: i64,
    pub stored_chat_id: i64,
    pub conversation_id: String,
    pub trigger_message: String,
    /// Detected categories only, in fixed order.
    pub badges: Vec<CategoryBadge>,
    pub explanation: Option<String>,
    pub analyzed_at: DateTime<Utc>,
    pub feedback: Option<FeedbackBadge>,
    pub flagged: FlaggedPreview,
}

/// Compose one record. Absent optional fields render as omission, never as an
/// error.
pub fn result_view(record: &AnalysisRecord) -> ResultView {
    let badges = record
        .detected_categories()
        .into_iter()
        .map(|category| CategoryBadge {
            category,
            label: category.label(),
            score: record.score(category),
            scale: category.scale_max(),
        })
        .collect();

    let full = flag_summary(&record.flagged_message_ids, &record.flagged_messages_details);
    let total = full.len();
    let mut entries = full;
    entries.truncate(FLAGGED_DISPLAY_CAP);
    let more = total.saturating_sub(FLAGGED_DISPLAY_CAP);

    ResultView {
        id: record.id,
        stored_chat_id: record.stored_chat_id,
        conversation_id: record.conversation_id.clone(),
        trigger_message: record.trigger_message.clone(),
        badges,
        explanation: record.explanation.clone(),
        analyzed_at: record.analyzed_at,
        feedback: record.human_feedback.map(|verdict| FeedbackBadge {
            verdict,
            reason: record.feedback_reason.clone(),
        }),
        flagged: FlaggedPreview { entries, more, total },
    }
}

/// A transcript composed for rendering: date groups, flag annotations, and the
/// flagged-message summary panel.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationView {
    pub stored_chat_id: i64,
    pub conversation_id: String,
    pub messages_count: usize,
    pub vendor_user: Option<String>,
    pub customer_user: Option<String>,
    pub trigger_message_id: Option<String>,
    pub trigger_message: Option<String>,
    pub flag_summary: Vec<FlagSummaryEntry>,
    pub groups: Vec<MessageGroup>,
}

/// Compose a provider transcript response into a [`ConversationView`].
///
/// A `success: false` response yields an error, never a partial transcript.
/// Missing flag details or a trigger id that is not in the transcript degrade
/// to rendering without that annotation.
pub fn conversation_view(
    resp: &ConversationResponse,
    display_offset: FixedOffset,
) -> Result<ConversationView> {
    if !resp.success {
        return Err(TradewatchError::ConversationUnavailable(resp.stored_chat_id));
    }

    let (flagged_ids, details) = match &resp.analysis {
        Some(analysis) => (
            analysis.flagged_message_ids.as_slice(),
            analysis.flagged_messages_details.as_slice(),
        ),
        None => (&[][..], &[][..]),
    };

    let annotated = annotate(
        &resp.messages,
        flagged_ids,
        details,
        resp.trigger_message_id.as_deref(),
    );
    let groups = group_messages(annotated, resp.vendor_user.as_deref(), display_offset);

    Ok(ConversationView {
        stored_chat_id: resp.stored_chat_id,
        conversation_id: resp.conversation_id.clone(),
        messages_count: if resp.messages_count > 0 {
            resp.messages_count
        } else {
            resp.messages.len()
        },
        vendor_user: resp.vendor_user.clone(),
        customer_user: resp.customer_user.clone(),
        trigger_message_id: resp.trigger_message_id.clone(),
        trigger_message: resp.trigger_message.clone(),
        flag_summary: flag_summary(flagged_ids, details),
        groups,
    })
}
