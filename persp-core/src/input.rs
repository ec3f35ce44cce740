/// Per-frame keyboard snapshot for the viewer controls
use std::collections::HashSet;

/// The fixed set of keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    PanBackward,
    PanForward,
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
    RollLeft,
    RollRight,
}

impl Key {
    pub const ALL: [Key; 12] = [
        Key::PanLeft,
        Key::PanRight,
        Key::PanUp,
        Key::PanDown,
        Key::PanBackward,
        Key::PanForward,
        Key::YawLeft,
        Key::YawRight,
        Key::PitchUp,
        Key::PitchDown,
        Key::RollLeft,
        Key::RollRight,
    ];
}

/// Keys currently held down
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    keys: HashSet<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<Key> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keys = HeldKeys::new();
        assert!(keys.is_empty());

        keys.press(Key::PanLeft);
        keys.press(Key::PanLeft);
        assert!(keys.is_held(Key::PanLeft));
        assert!(!keys.is_held(Key::PanRight));

        keys.release(Key::PanLeft);
        assert!(keys.is_empty());
    }

    #[test]
    fn test_collect() {
        let keys: HeldKeys = [Key::YawLeft, Key::RollRight].into_iter().collect();
        assert!(keys.is_held(Key::YawLeft));
        assert!(keys.is_held(Key::RollRight));
        assert_eq!(Key::ALL.iter().filter(|k| keys.is_held(**k)).count(), 2);
    }
}
