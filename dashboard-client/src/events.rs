//! Session signals for the UI layer
//!
//! The access layer never navigates; it broadcasts what happened and lets the
//! embedding application decide (e.g. redirect to the login screen).

use tokio::sync::broadcast;

use crate::mode::Mode;

const CHANNEL_CAPACITY: usize = 64;

/// Signal emitted by the access layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Session cleared; the user must sign in again
    Expired { path: String },
    /// Mode state changed
    ModeChanged { mode: Mode },
    /// A response carried a new bearer token that replaced the session token
    TokenRotated,
}

/// Broadcast channel for [`SessionEvent`]s
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Send an event. Having no subscribers is not an error.
    pub fn emit(&self, event: SessionEvent) {
        tracing::debug!(?event, "Session event");
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_without_subscribers() {
        let bus = EventBus::new();
        bus.emit(SessionEvent::TokenRotated);
    }

    #[tokio::test]
    async fn test_subscriber_receives() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        bus.emit(SessionEvent::Expired {
            path: "/projects".into(),
        });
        assert_eq!(
            rx.recv().await.unwrap(),
            SessionEvent::Expired {
                path: "/projects".into()
            }
        );
    }
}
