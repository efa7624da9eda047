//! Conversation transcripts as returned by the Conversation Provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::FlaggedMessageDetail;

/// One transcript entry. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    #[serde(alias = "message")]
    pub text: String,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Flag annotations the provider attaches to a transcript.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConversationAnalysis {
    #[serde(default)]
    pub flagged_message_ids: Vec<String>,
    #[serde(default)]
    pub flagged_messages_details: Vec<FlaggedMessageDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzed_at: Option<DateTime<Utc>>,
}

/// Full transcript response for one stored chat.
///
/// `success: false` means no transcript may be rendered, not a partial one.
/// Participant fields are optional because older backends omit some of them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConversationResponse {
    pub success: bool,
    pub stored_chat_id: i64,
    #[serde(default)]
    pub conversation_id: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub messages_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ConversationAnalysis>,
}
