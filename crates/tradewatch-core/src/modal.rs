//! Conversation modal controller.
//!
//! One modal target at a time; each open owns exactly one in-flight transcript
//! fetch, identified by an epoch. Closing or retargeting the modal bumps the
//! epoch so a late result for the old target is ignored. Transcripts are never
//! cached across opens.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::warn;

use crate::provider::ConversationProvider;
use crate::view::{ConversationView, conversation_view};
use chrono::FixedOffset;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ModalState {
    Closed,
    Loading { stored_chat_id: i64 },
    Ready { view: ConversationView },
    Error { stored_chat_id: i64, message: String },
}

#[derive(Debug)]
pub struct ModalController {
    state: ModalState,
    epoch: u64,
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalController {
    pub fn new() -> Self {
        Self {
            state: ModalState::Closed,
            epoch: 0,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    /// Open (or retarget) the modal. Always issues a fresh fetch.
    pub fn open(&mut self, stored_chat_id: i64) -> u64 {
        self.epoch += 1;
        self.state = ModalState::Loading { stored_chat_id };
        self.epoch
    }

    /// Close the modal, invalidating any pending fetch for it.
    pub fn close(&mut self) {
        self.epoch += 1;
        self.state = ModalState::Closed;
    }

    pub fn apply_success(&mut self, epoch: u64, view: ConversationView) -> bool {
        if epoch != self.epoch {
            return false;
        }
        self.state = ModalState::Ready { view };
        true
    }

    pub fn apply_failure(&mut self, epoch: u64, stored_chat_id: i64, message: String) -> bool {
        if epoch != self.epoch {
            return false;
        }
        self.state = ModalState::Error {
            stored_chat_id,
            message,
        };
        true
    }
}

/// Async wrapper pairing the controller with a conversation provider.
pub struct ModalService {
    controller: RwLock<ModalController>,
    provider: Arc<dyn ConversationProvider>,
    display_offset: FixedOffset,
}

impl ModalService {
    pub fn new(provider: Arc<dyn ConversationProvider>, display_offset: FixedOffset) -> Self {
        Self {
            controller: RwLock::new(ModalController::new()),
            provider,
            display_offset,
        }
    }

    /// Open the modal on a stored chat and fetch its transcript.
    pub async fn open(&self, stored_chat_id: i64) {
        let epoch = self.controller.write().await.open(stored_chat_id);
        let result = self.provider.fetch_conversation(stored_chat_id).await;
        let mut ctrl = self.controller.write().await;
        match result.and_then(|resp| conversation_view(&resp, self.display_offset)) {
            Ok(view) => {
                ctrl.apply_success(epoch, view);
            }
            Err(err) => {
                warn!(target: "tradewatch::modal", stored_chat_id, error = %err, "conversation fetch failed");
                ctrl.apply_failure(epoch, stored_chat_id, err.to_string());
            }
        }
    }

    pub async fn close(&self) {
        self.controller.write().await.close();
    }

    pub async fn state(&self) -> ModalState {
        self.controller.read().await.state().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use async_trait::async_trait;
    use tokio::sync::{Mutex, Notify, oneshot};
    use tradewatch_types::ConversationResponse;

    fn transcript(stored_chat_id: i64) -> ConversationResponse {
        ConversationResponse {
            success: true,
            stored_chat_id,
            conversation_id: format!("c-{stored_chat_id}"),
            messages: Vec::new(),
            messages_count: 0,
            first_user: None,
            second_user: None,
            vendor_user: None,
            customer_user: None,
            trigger_message_id: None,
            trigger_message: None,
            analysis: None,
        }
    }

    fn view(stored_chat_id: i64) -> ConversationView {
        conversation_view(&transcript(stored_chat_id), FixedOffset::east_opt(0).unwrap())
            .unwrap()
    }

    #[test]
    fn test_close_invalidates_pending_fetch() {
        let mut ctrl = ModalController::new();
        let epoch = ctrl.open(7);
        ctrl.close();
        assert!(!ctrl.apply_success(epoch, view(7)));
        assert!(matches!(ctrl.state(), ModalState::Closed));
    }

    #[test]
    fn test_retarget_discards_old_targets_result() {
        let mut ctrl = ModalController::new();
        let first = ctrl.open(7);
        let second = ctrl.open(8);
        assert!(!ctrl.apply_success(first, view(7)));
        assert!(ctrl.apply_success(second, view(8)));
        match ctrl.state() {
            ModalState::Ready { view } => assert_eq!(view.stored_chat_id, 8),
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn test_failure_is_a_distinct_state() {
        let mut ctrl = ModalController::new();
        let epoch = ctrl.open(7);
        assert!(ctrl.apply_failure(epoch, 7, "unavailable".into()));
        assert!(matches!(ctrl.state(), ModalState::Error { stored_chat_id: 7, .. }));
    }

    struct GatedConversations {
        pending: Mutex<Vec<(i64, oneshot::Sender<Result<ConversationResponse>>)>>,
        arrived: Notify,
    }

    #[async_trait]
    impl ConversationProvider for GatedConversations {
        async fn fetch_conversation(&self, stored_chat_id: i64) -> Result<ConversationResponse> {
            let (tx, rx) = oneshot::channel();
            self.pending.lock().await.push((stored_chat_id, tx));
            self.arrived.notify_waiters();
            rx.await.expect("test dropped the call")
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_close_during_fetch_leaves_modal_closed() {
        let provider = Arc::new(GatedConversations {
            pending: Mutex::new(Vec::new()),
            arrived: Notify::new(),
        });
        let service = Arc::new(ModalService::new(
            provider.clone(),
            FixedOffset::east_opt(0).unwrap(),
        ));

        let open = {
            let service = service.clone();
            tokio::spawn(async move { service.open(7).await })
        };
        loop {
            if !provider.pending.lock().await.is_empty() {
                break;
            }
            provider.arrived.notified().await;
        }
        service.close().await;
        let (_, tx) = provider.pending.lock().await.remove(0);
        let _ = tx.send(Ok(transcript(7)));
        open.await.unwrap();

        assert!(matches!(service.state().await, ModalState::Closed));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_unsuccessful_transcript_renders_error_state() {
        struct Failing;
        #[async_trait]
        impl ConversationProvider for Failing {
            async fn fetch_conversation(&self, stored_chat_id: i64) -> Result<ConversationResponse> {
                let mut resp = transcript(stored_chat_id);
                resp.success = false;
                Ok(resp)
            }
        }
        let service = ModalService::new(Arc::new(Failing), FixedOffset::east_opt(0).unwrap());
        service.open(9).await;
        assert!(matches!(
            service.state().await,
            ModalState::Error { stored_chat_id: 9, .. }
        ));
    }
}
