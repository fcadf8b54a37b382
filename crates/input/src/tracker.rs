use rollcube_common::{Direction, KeyBindings};

/// A raw event delivered by the input host.
///
/// Keys are host key names (`"w"`, `"ArrowUp"`, ...), matched against
/// [`KeyBindings`] case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    /// The window lost keyboard focus; no key-up will follow.
    FocusLost,
}

/// Keeps track of which direction to roll next based on player input.
///
/// The host writes to the tracker from its event callback and the frame
/// update reads [`pending_direction`](Self::pending_direction). Both run on
/// the same thread, so the tracker is a plain value.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    bindings: KeyBindings,
    pending: Direction,
}

impl InputTracker {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            pending: Direction::None,
        }
    }

    /// Direction requested for the next quarter turn.
    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    /// Handle a key press. Returns `true` if the key is a movement key.
    ///
    /// Overwrites any direction already pending.
    pub fn on_key_down(&mut self, key: &str) -> bool {
        let Some(direction) = self.bindings.direction_for(key) else {
            return false;
        };
        if self.pending != direction {
            tracing::trace!(key, %direction, previous = %self.pending, "direction queued");
        }
        self.pending = direction;
        true
    }

    /// Handle a key release. Returns `true` if the key is a movement key.
    ///
    /// Only clears the pending direction when it still belongs to `key`, so
    /// releasing a key that was overridden by a later press is a no-op.
    pub fn on_key_up(&mut self, key: &str) -> bool {
        let Some(direction) = self.bindings.direction_for(key) else {
            return false;
        };
        if self.pending == direction {
            tracing::trace!(key, %direction, "direction released");
            self.pending = Direction::None;
        }
        true
    }

    /// Drop whatever is pending.
    pub fn clear(&mut self) {
        self.pending = Direction::None;
    }

    /// Apply one host event. Returns `true` if it concerned a movement key.
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::KeyDown(key) => self.on_key_down(key),
            InputEvent::KeyUp(key) => self.on_key_up(key),
            InputEvent::FocusLost => {
                self.clear();
                false
            }
        }
    }
}
