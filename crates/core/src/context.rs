//! Per-session dialogue context
//!
//! Short-term memory for one session: enough to resolve "how much is it?"
//! after a room was mentioned on a previous turn. Created default-initialized
//! on first access and discarded when the session ends; nothing here is
//! persisted.

use crate::{Intent, RoomType};
use serde::{Deserialize, Serialize};

/// Mutable per-session state, one instance per session key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DialogueContext {
    /// Intent resolved on the previous turn, if any turn has happened.
    pub last_intent: Option<Intent>,
    /// Room type most recently referenced, used for anaphora resolution.
    pub last_room_type: Option<RoomType>,
    /// Completed turns in this session.
    pub turn_count: u32,
}

/// What one turn writes back into the context.
///
/// Applied atomically by the session manager after the reply is produced.
/// A `None` room type leaves the previous reference in place so follow-up
/// turns ("and the suite?" ... "how much is it?") keep working.
#[derive(Debug, Clone)]
pub struct ContextPatch {
    pub intent: Intent,
    pub room_type: Option<RoomType>,
}

impl DialogueContext {
    /// Fold a turn's outcome into the context and bump the turn counter.
    pub fn apply(&mut self, patch: &ContextPatch) {
        self.last_intent = Some(patch.intent);
        if patch.room_type.is_some() {
            self.last_room_type = patch.room_type;
        }
        self.turn_count += 1;
    }
}
