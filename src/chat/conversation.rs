//! Per-conversation thread state.

use std::sync::Arc;

use super::ChatAssistant;

/// `Uninitialized -> Threaded`. The thread is created on the first message
/// and reused for every later turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadState {
    Uninitialized,
    Threaded(String),
}

/// One user's conversation with the assistant.
pub struct Conversation {
    assistant: Arc<ChatAssistant>,
    state: ThreadState,
    cart_id: Option<String>,
}

impl Conversation {
    pub fn new(assistant: Arc<ChatAssistant>, cart_id: Option<String>) -> Self {
        Self {
            assistant,
            state: ThreadState::Uninitialized,
            cart_id,
        }
    }

    /// Continue a conversation whose thread id the client kept.
    pub fn resume(
        assistant: Arc<ChatAssistant>,
        thread_id: Option<String>,
        cart_id: Option<String>,
    ) -> Self {
        let state = match thread_id.filter(|id| !id.trim().is_empty()) {
            Some(id) => ThreadState::Threaded(id),
            None => ThreadState::Uninitialized,
        };
        Self {
            assistant,
            state,
            cart_id,
        }
    }

    pub fn state(&self) -> &ThreadState {
        &self.state
    }

    pub fn thread_id(&self) -> Option<&str> {
        match &self.state {
            ThreadState::Threaded(id) => Some(id),
            ThreadState::Uninitialized => None,
        }
    }

    async fn ensure_thread(&mut self) -> String {
        match &self.state {
            ThreadState::Threaded(id) => id.clone(),
            ThreadState::Uninitialized => {
                let id = self.assistant.create_thread().await;
                self.state = ThreadState::Threaded(id.clone());
                id
            }
        }
    }

    /// Send a message on this conversation's thread.
    pub async fn send(&mut self, text: &str) -> String {
        let thread_id = self.ensure_thread().await;
        self.assistant
            .send_message(text, &thread_id, self.cart_id.as_deref())
            .await
    }
}
