//! Session manager
//!
//! Keeps one [`DialogueContext`] per session key. Contexts are created
//! default-initialized on first touch and patched atomically per turn;
//! concurrent sessions never observe each other's state.

use concierge_core::{ContextPatch, DialogueContext};
use dashmap::DashMap;

/// Concurrent map of session key to dialogue context.
#[derive(Default)]
pub struct SessionManager {
    sessions: DashMap<String, DialogueContext>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a session's context; default for an unknown session.
    pub fn context(&self, session_id: &str) -> DialogueContext {
        self.sessions
            .get(session_id)
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Fold one turn's outcome into the session, creating it if needed.
    pub fn apply(&self, session_id: &str, patch: &ContextPatch) {
        self.sessions
            .entry(session_id.to_string())
            .or_default()
            .apply(patch);
    }

    /// Drop a session's context.
    pub fn end(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_core::{Intent, RoomType};

    #[test]
    fn sessions_are_isolated() {
        let manager = SessionManager::new();
        manager.apply(
            "alpha",
            &ContextPatch {
                intent: Intent::RoomInquiry,
                room_type: Some(RoomType::Suite),
            },
        );

        assert_eq!(manager.context("alpha").last_room_type, Some(RoomType::Suite));
        assert_eq!(manager.context("beta").last_room_type, None);
        assert_eq!(manager.context("beta").turn_count, 0);
    }

    #[test]
    fn ending_a_session_clears_its_context() {
        let manager = SessionManager::new();
        manager.apply(
            "alpha",
            &ContextPatch {
                intent: Intent::Greeting,
                room_type: None,
            },
        );
        manager.end("alpha");
        assert_eq!(manager.context("alpha").turn_count, 0);
        assert_eq!(manager.active_sessions(), 0);
    }
}
