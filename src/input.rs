//! Key state handed in by the host's input layer
//!
//! The host records presses and releases; the simulation reads them and
//! latches edge-triggered keys so a held key fires only once.

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Launch,
    Confirm,
    Up,
    Down,
}

impl Key {
    pub const COUNT: usize = 6;

    pub const ALL: [Key; Key::COUNT] = [
        Key::Left,
        Key::Right,
        Key::Launch,
        Key::Confirm,
        Key::Up,
        Key::Down,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Pressed table plus the parallel "already processed" latch table
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pressed: [bool; Key::COUNT],
    processed: [bool; Key::COUNT],
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press or release. Releasing clears the key's latch.
    pub fn set(&mut self, key: Key, down: bool) {
        self.pressed[key.index()] = down;
        if !down {
            self.processed[key.index()] = false;
        }
    }

    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    /// Level-triggered read
    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    pub fn is_processed(&self, key: Key) -> bool {
        self.processed[key.index()]
    }

    /// Edge-triggered read: true once per physical press, then latched
    /// until the key is released.
    pub fn take_press(&mut self, key: Key) -> bool {
        let i = key.index();
        if self.pressed[i] && !self.processed[i] {
            self.processed[i] = true;
            true
        } else {
            false
        }
    }
}
