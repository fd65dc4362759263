//! Chat panel visibility notifier.

use tokio::sync::watch;

/// Shared show/hide state for the chat panel.
///
/// Subscribers are notified only when the state actually changes. Dropping a
/// receiver unsubscribes it.
#[derive(Debug)]
pub struct ChatVisibility {
    state: watch::Sender<bool>,
}

impl Default for ChatVisibility {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatVisibility {
    /// Starts hidden.
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self { state }
    }

    pub fn is_visible(&self) -> bool {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.receiver_count()
    }

    pub fn show(&self) {
        self.set(true);
    }

    pub fn hide(&self) {
        self.set(false);
    }

    pub fn toggle(&self) {
        self.set(!self.is_visible());
    }

    fn set(&self, visible: bool) {
        self.state.send_if_modified(|current| {
            if *current == visible {
                return false;
            }
            *current = visible;
            true
        });
    }
}
