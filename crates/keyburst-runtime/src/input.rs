//! Keyboard events to burst triggers

use keyburst_particles::Trigger;
use winit::event::ElementState;
use winit::keyboard::{Key, NamedKey};

/// Name a logical key the way the trigger layer expects.
///
/// Printable keys yield their text; left/right modifier variants collapse to
/// `Alt`, `Control`, `Meta` and `Shift` so the engine can filter them.
pub fn key_identifier(key: &Key) -> Option<String> {
    match key {
        Key::Character(text) => Some(text.to_string()),
        Key::Named(named) => Some(named_key_identifier(*named)),
        Key::Dead(_) => Some("Dead".to_string()),
        Key::Unidentified(_) => None,
    }
}

fn named_key_identifier(named: NamedKey) -> String {
    match named {
        NamedKey::Alt | NamedKey::AltGraph => "Alt".to_string(),
        NamedKey::Control => "Control".to_string(),
        NamedKey::Shift => "Shift".to_string(),
        NamedKey::Super | NamedKey::Meta | NamedKey::Hyper => "Meta".to_string(),
        other => format!("{other:?}"),
    }
}

/// One trigger per physical key-down; releases and OS auto-repeat yield nothing
pub fn trigger_for_key(key: &Key, state: ElementState, repeat: bool) -> Option<Trigger> {
    if state != ElementState::Pressed || repeat {
        return None;
    }
    key_identifier(key).map(Trigger::new)
}
