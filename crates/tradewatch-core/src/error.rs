//! Error types for Tradewatch.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TradewatchError {
    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("invalid {command} limit {given}: must be between 1 and {max}")]
    InvalidLimit {
        command: &'static str,
        given: i64,
        max: u32,
    },

    #[error("reset-analysis requires explicit confirmation")]
    ConfirmationRequired,

    #[error("conversation for stored chat {0} is unavailable")]
    ConversationUnavailable(i64),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TradewatchError {
    /// Whether the error is a pre-dispatch validation rejection (surfaced next
    /// to the offending input) rather than a provider failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TradewatchError::InvalidLimit { .. } | TradewatchError::ConfirmationRequired
        )
    }
}
