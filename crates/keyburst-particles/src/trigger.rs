//! Key-press trigger values delivered by the input layer

use serde::{Deserialize, Serialize};

/// Keys that never start a burst, so ordinary chords stay quiet
pub const MODIFIER_KEYS: [&str; 4] = ["Alt", "Control", "Meta", "Shift"];

/// One physical key-down, identified by its logical key name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trigger {
    pub key: String,
}

impl Trigger {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn is_modifier(&self) -> bool {
        MODIFIER_KEYS.contains(&self.key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_detected() {
        for key in MODIFIER_KEYS {
            assert!(Trigger::new(key).is_modifier(), "{key}");
        }
    }

    #[test]
    fn ordinary_keys_are_not_modifiers() {
        for key in ["a", "Z", "Enter", "Space", "shift", "F5", ""] {
            assert!(!Trigger::new(key).is_modifier(), "{key}");
        }
    }
}
