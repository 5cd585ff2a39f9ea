use crate::consts::KEY_COUNT;
use tracing::debug;

/// Held/released state of the 16-key hex keypad, written by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys outside 0-F are ignored.
    pub fn set(&mut self, key: u8, pressed: bool) {
        match self.keys.get_mut(key as usize) {
            Some(k) => *k = pressed,
            None => debug!(key, "ignoring key outside of keypad"),
        }
    }

    /// Instructions look keys up by the low nibble of a register.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }

    /// Lowest-numbered key currently held.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&k| k).map(|k| k as u8)
    }

    pub fn release_all(&mut self) {
        self.keys = [false; KEY_COUNT];
    }
}
