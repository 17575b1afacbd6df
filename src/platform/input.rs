//! Input contract with the event source

/// Keys the game reacts to; everything else arrives as `Other`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Up,
    Down,
    Left,
    Right,
    /// Re-scan texture and sound files
    Reload,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A discrete event from the window layer. Coordinates are screen space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    MouseDown { button: MouseButton, x: i32, y: i32 },
    /// Window closed
    Quit,
}

/// Continuous input state, sampled once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Screen-space pointer position
    pub pointer: (i32, i32),
}

impl HeldInput {
    pub fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::Up => self.up = held,
            Key::Down => self.down = held,
            Key::Left => self.left = held,
            Key::Right => self.right = held,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_tracks_movement_keys_only() {
        let mut held = HeldInput::default();
        held.set(Key::Up, true);
        held.set(Key::Right, true);
        held.set(Key::Space, true);
        assert!(held.up && held.right);
        assert!(!held.down && !held.left);

        held.set(Key::Up, false);
        assert!(!held.up);
        assert_eq!(held.pointer, (0, 0));
    }
}
