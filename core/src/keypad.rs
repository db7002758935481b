use crate::constants::KEY_COUNT;

/// # Keypad
/// Chip-8 input is generated with a 16 key hexadecimal keypad.
///
/// The machine asks whether a logical key 0..F is held down at the moment an instruction
/// needs to know. How physical keys map onto logical ones is up to the implementor.
/// Keys above 0xF are never pressed.
pub trait Keypad {
    fn is_key_pressed(&self, key: u8) -> bool;
}

impl Keypad for [bool; KEY_COUNT] {
    fn is_key_pressed(&self, key: u8) -> bool {
        self.get(key as usize).copied().unwrap_or(false)
    }
}

/// Tracks the pressed status of every key from press and release events.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pressed: [bool; KEY_COUNT],
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of `key`
    pub fn key_press(&mut self, key: u8) {
        if let Some(pressed) = self.pressed.get_mut(key as usize) {
            *pressed = true;
        }
    }

    /// Unset the pressed status of `key`
    pub fn key_release(&mut self, key: u8) {
        if let Some(pressed) = self.pressed.get_mut(key as usize) {
            *pressed = false;
        }
    }
}

impl Keypad for KeyState {
    fn is_key_pressed(&self, key: u8) -> bool {
        self.pressed.is_key_pressed(key)
    }
}
