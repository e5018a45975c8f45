//! Live/mock mode selection
//!
//! Failover is one-directional: once a session degrades to [`Mode::Mock`] it
//! stays there until the caller explicitly asks to reconnect.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::events::{EventBus, SessionEvent};

/// Where requests are answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Live,
    Mock,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Live => write!(f, "live"),
            Mode::Mock => write!(f, "mock"),
        }
    }
}

/// Decide whether a request goes to the mock engine
///
/// Explicit flag, then connectivity, then the sticky mode state.
pub fn select_mode(mock_flag: bool, online: bool, state: Mode) -> Mode {
    if mock_flag || !online || state == Mode::Mock {
        Mode::Mock
    } else {
        Mode::Live
    }
}

/// Mode state owned by one client instance
#[derive(Debug)]
pub struct ModeSelector {
    mock_flag: AtomicBool,
    online: AtomicBool,
    degraded: AtomicBool,
    events: EventBus,
}

impl ModeSelector {
    pub fn new(mock_flag: bool, events: EventBus) -> Self {
        Self {
            mock_flag: AtomicBool::new(mock_flag),
            online: AtomicBool::new(true),
            degraded: AtomicBool::new(false),
            events,
        }
    }

    /// Sticky mode state (ignores the flag and connectivity)
    pub fn state(&self) -> Mode {
        if self.degraded.load(Ordering::Acquire) {
            Mode::Mock
        } else {
            Mode::Live
        }
    }

    /// Effective mode for the next request
    pub fn current(&self) -> Mode {
        select_mode(
            self.mock_flag.load(Ordering::Acquire),
            self.online.load(Ordering::Acquire),
            self.state(),
        )
    }

    pub fn should_use_mock(&self) -> bool {
        self.current() == Mode::Mock
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    pub fn mock_flag(&self) -> bool {
        self.mock_flag.load(Ordering::Acquire)
    }

    /// Switch to mock after a transport failure. Returns true on the first
    /// transition only.
    pub fn degrade(&self, reason: &str) -> bool {
        let changed = !self.degraded.swap(true, Ordering::AcqRel);
        if changed {
            tracing::warn!(reason, "Live API unreachable, switching to mock mode");
            self.events.emit(SessionEvent::ModeChanged { mode: Mode::Mock });
        }
        changed
    }

    /// Reset the sticky state to live; the next dispatch proves connectivity
    pub fn try_reconnect(&self) {
        if self.degraded.swap(false, Ordering::AcqRel) {
            tracing::info!("Retrying live API");
            self.events.emit(SessionEvent::ModeChanged { mode: self.current() });
        }
    }

    /// Operator toggle: answer everything from the mock engine
    pub fn enable_mock(&self) {
        let before = self.current();
        self.mock_flag.store(true, Ordering::Release);
        self.notify_if_changed(before);
    }

    /// Operator toggle: clear the mock flag and the sticky state
    pub fn enable_live(&self) {
        let before = self.current();
        self.mock_flag.store(false, Ordering::Release);
        self.degraded.store(false, Ordering::Release);
        self.notify_if_changed(before);
    }

    /// Update the connectivity flag
    pub fn set_online(&self, online: bool) {
        let before = self.current();
        if self.online.swap(online, Ordering::AcqRel) != online {
            tracing::info!(online, "Connectivity changed");
        }
        self.notify_if_changed(before);
    }

    fn notify_if_changed(&self, before: Mode) {
        let after = self.current();
        if before != after {
            self.events.emit(SessionEvent::ModeChanged { mode: after });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_mode_table() {
        use Mode::*;
        assert_eq!(select_mode(false, true, Live), Live);
        assert_eq!(select_mode(true, true, Live), Mock);
        assert_eq!(select_mode(false, false, Live), Mock);
        assert_eq!(select_mode(false, true, Mock), Mock);
        assert_eq!(select_mode(true, false, Mock), Mock);
    }

    #[test]
    fn test_degrade_is_sticky() {
        let selector = ModeSelector::new(false, EventBus::new());
        assert!(!selector.should_use_mock());

        assert!(selector.degrade("timeout"));
        assert!(!selector.degrade("timeout again"));
        assert_eq!(selector.current(), Mode::Mock);

        // Connectivity coming back does not undo the failover
        selector.set_online(true);
        assert_eq!(selector.current(), Mode::Mock);

        selector.try_reconnect();
        assert_eq!(selector.current(), Mode::Live);
    }

    #[test]
    fn test_operator_toggles() {
        let selector = ModeSelector::new(false, EventBus::new());
        selector.enable_mock();
        assert!(selector.should_use_mock());
        assert_eq!(selector.state(), Mode::Live);

        selector.degrade("network");
        selector.enable_live();
        assert_eq!(selector.current(), Mode::Live);
    }

    #[tokio::test]
    async fn test_mode_change_events() {
        let events = EventBus::new();
        let mut rx = events.subscribe();
        let selector = ModeSelector::new(false, events);

        selector.set_online(false);
        assert_eq!(
            rx.recv().await.unwrap(),
            SessionEvent::ModeChanged { mode: Mode::Mock }
        );

        // Already mock: degrading emits the sticky transition only
        selector.degrade("network");
        assert_eq!(
            rx.recv().await.unwrap(),
            SessionEvent::ModeChanged { mode: Mode::Mock }
        );
    }
}
