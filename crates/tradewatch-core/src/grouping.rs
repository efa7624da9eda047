//! Date-bucketed, role-attributed grouping of a transcript.

use chrono::FixedOffset;
use serde::Serialize;

use crate::flags::AnnotatedMessage;

/// Which column a message renders in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Vendor,
    Customer,
}

/// A fully render-ready message: annotations plus placement side.
#[derive(Debug, Clone, Serialize)]
pub struct RenderMessage {
    #[serde(flatten)]
    pub annotated: AnnotatedMessage,
    pub side: Side,
}

/// Messages sharing one calendar date, in original relative order.
#[derive(Debug, Clone, Serialize)]
pub struct MessageGroup {
    /// Calendar date of the bucket under the display offset, `YYYY-MM-DD`.
    pub date_key: String,
    pub messages: Vec<RenderMessage>,
}

/// Partition annotated messages into date groups.
///
/// Group order is first-occurrence order of each date in the input (equal to
/// chronological order when the input is chronological); within a group the
/// original relative order is preserved. A message is vendor-side iff its
/// sender equals the conversation's vendor identifier.
pub fn group_messages(
    messages: Vec<AnnotatedMessage>,
    vendor_user: Option<&str>,
    display_offset: FixedOffset,
) -> Vec<MessageGroup> {
    let mut groups: Vec<MessageGroup> = Vec::new();
    for annotated in messages {
        let date_key = annotated
            .message
            .created_at
            .with_timezone(&display_offset)
            .format("%Y-%m-%d")
            .to_string();
        let side = if Some(annotated.message.sender.as_str()) == vendor_user {
            Side::Vendor
        } else {
            Side::Customer
        };
        let rendered = RenderMessage { annotated, side };
        match groups.iter_mut().find(|g| g.date_key == date_key) {
            Some(group) => group.messages.push(rendered),
            None => groups.push(MessageGroup {
                date_key,
                messages: vec![rendered],
            }),
        }
    }
    groups
}
