/// Translates crossterm key events into held-key snapshots
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use persp_core::{HeldKeys, Key};

/// What a single key event asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Control(Key),
    Ignored,
}

/// Viewer key for a terminal key code
pub fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => Key::PanLeft,
            'd' => Key::PanRight,
            'w' => Key::PanUp,
            's' => Key::PanDown,
            'q' => Key::PanBackward,
            'e' => Key::PanForward,
            ',' | '<' => Key::RollLeft,
            '.' | '>' => Key::RollRight,
            _ => return None,
        },
        KeyCode::Left => Key::YawLeft,
        KeyCode::Right => Key::YawRight,
        KeyCode::Up => Key::PitchUp,
        KeyCode::Down => Key::PitchDown,
        _ => return None,
    };
    Some(key)
}

/// Classify a key event, with the close signal taking priority
pub fn classify(event: &KeyEvent) -> KeyAction {
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    match event.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => KeyAction::Quit,
        code => map_key(code).map_or(KeyAction::Ignored, KeyAction::Control),
    }
}

/// Tracks which viewer keys are held across frames.
///
/// Terminals only report key releases when keyboard enhancement is
/// available. Without it, each press (or auto-repeat) counts as held for
/// the frame it arrives in.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    held: HeldKeys,
    reports_release: bool,
}

impl KeyTracker {
    pub fn new(reports_release: bool) -> Self {
        Self {
            held: HeldKeys::new(),
            reports_release,
        }
    }

    pub fn reports_release(&self) -> bool {
        self.reports_release
    }

    pub fn handle(&mut self, key: Key, kind: KeyEventKind) {
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.held.press(key),
            KeyEventKind::Release => self.held.release(key),
        }
    }

    pub fn held(&self) -> &HeldKeys {
        &self.held
    }

    /// Called once the frame has consumed the snapshot
    pub fn end_frame(&mut self) {
        if !self.reports_release {
            self.held.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        assert_eq!(map_key(KeyCode::Char('d')), Some(Key::PanRight));
        assert_eq!(map_key(KeyCode::Char('Q')), Some(Key::PanBackward));
        assert_eq!(map_key(KeyCode::Char(',')), Some(Key::RollLeft));
        assert_eq!(map_key(KeyCode::Up), Some(Key::PitchUp));
        assert_eq!(map_key(KeyCode::Char('z')), None);
        assert_eq!(map_key(KeyCode::Enter), None);
    }

    #[test]
    fn test_every_key_is_bound() {
        let codes = [
            KeyCode::Char('a'),
            KeyCode::Char('d'),
            KeyCode::Char('w'),
            KeyCode::Char('s'),
            KeyCode::Char('q'),
            KeyCode::Char('e'),
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Char(','),
            KeyCode::Char('.'),
        ];
        let bound: HeldKeys = codes.into_iter().filter_map(map_key).collect();
        assert!(Key::ALL.iter().all(|key| bound.is_held(*key)));
    }

    #[test]
    fn test_close_signal() {
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(classify(&esc), KeyAction::Quit);
        assert_eq!(classify(&ctrl_c), KeyAction::Quit);
        // Plain q pans backward
        assert_eq!(classify(&q), KeyAction::Control(Key::PanBackward));
    }

    #[test]
    fn test_tracker_with_release_events() {
        let mut tracker = KeyTracker::new(true);
        tracker.handle(Key::PanLeft, KeyEventKind::Press);
        tracker.end_frame();
        assert!(tracker.held().is_held(Key::PanLeft));

        tracker.handle(Key::PanLeft, KeyEventKind::Release);
        assert!(!tracker.held().is_held(Key::PanLeft));
    }

    #[test]
    fn test_tracker_without_release_events() {
        let mut tracker = KeyTracker::new(false);
        tracker.handle(Key::YawRight, KeyEventKind::Press);
        assert!(tracker.held().is_held(Key::YawRight));
        tracker.end_frame();
        assert!(tracker.held().is_empty());
    }
}
