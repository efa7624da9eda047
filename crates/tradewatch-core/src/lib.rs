//! Core derivation and state logic for the Tradewatch dashboard.
//!
//! Everything stateful lives here: the pagination controller, the conversation
//! modal controller, and the action dispatcher. Everything derived lives
//! alongside: stats resolution, flag cross-referencing, date grouping, and the
//! renderable view-models. The server crate is a thin JSON surface over these.

mod actions;
mod dashboard;
mod error;
mod flags;
mod grouping;
mod modal;
mod provider;
mod service;
mod stats;
mod taxonomy;
mod upstream;
mod view;

pub use actions::{ActionDispatcher, CommandKind, CommandState};
pub use dashboard::{DashboardController, FetchTicket, LoadState};
pub use error::TradewatchError;
pub use flags::{AnnotatedMessage, FlagAnnotation, FlagSummaryEntry, annotate, flag_summary};
pub use grouping::{MessageGroup, RenderMessage, Side, group_messages};
pub use modal::{ModalController, ModalService, ModalState};
pub use provider::{CommandClient, ConversationProvider, ModelConfigProvider, ResultsProvider};
pub use service::{DashboardService, DashboardSnapshot};
pub use stats::{combined_count, normalize_dashboard, percentage, resolve_stats};
pub use taxonomy::{FilterTab, filter_tabs};
pub use upstream::UpstreamClient;
pub use view::{
    CategoryBadge, ConversationView, FLAGGED_DISPLAY_CAP, FeedbackBadge, FlaggedPreview,
    ResultView, conversation_view, result_view,
};

/// Result type for Tradewatch operations.
pub type Result<T> = std::result::Result<T, TradewatchError>;
