//! Trailing-debounce flag behind the "press any key" label

use keyburst_particles::Trigger;
use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);

/// Turns on with each trigger and off once no trigger has arrived for `debounce`.
///
/// With `ignore_first`, the very first value observed (the host pushes `None`
/// when the window comes up) does not switch the label on.
#[derive(Debug, Clone)]
pub struct IdleLabel {
    debounce: Duration,
    ignore_first: bool,
    seen_first: bool,
    active: bool,
    deadline: Option<Instant>,
}

impl Default for IdleLabel {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE, true)
    }
}

impl IdleLabel {
    pub fn new(debounce: Duration, ignore_first: bool) -> Self {
        Self {
            debounce,
            ignore_first,
            seen_first: false,
            active: false,
            deadline: None,
        }
    }

    /// Feed a trigger value observed at `now`
    pub fn on_value(&mut self, value: Option<&Trigger>, now: Instant) {
        let first = !self.seen_first;
        self.seen_first = true;
        if first && self.ignore_first {
            return;
        }
        if value.is_none() {
            return;
        }
        self.active = true;
        self.deadline = Some(now + self.debounce);
    }

    /// Expire the flag if the debounce window has passed, returning the current state
    pub fn poll(&mut self, now: Instant) -> bool {
        if let Some(deadline) = self.deadline {
            if now >= deadline {
                self.active = false;
                self.deadline = None;
            }
        }
        self.active
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> Trigger {
        Trigger::new("a")
    }

    #[test]
    fn starts_inactive() {
        let mut label = IdleLabel::default();
        assert!(!label.poll(Instant::now()));
        assert_eq!(label.debounce(), Duration::from_millis(2000));
    }

    #[test]
    fn first_value_ignored() {
        let mut label = IdleLabel::default();
        let t0 = Instant::now();
        label.on_value(None, t0);
        assert!(!label.poll(t0));

        label.on_value(Some(&key()), t0);
        assert!(label.poll(t0));
    }

    #[test]
    fn first_trigger_ignored_when_no_mount_value() {
        let mut label = IdleLabel::default();
        let t0 = Instant::now();
        label.on_value(Some(&key()), t0);
        assert!(!label.poll(t0));
        label.on_value(Some(&key()), t0);
        assert!(label.poll(t0));
    }

    #[test]
    fn without_ignore_first_the_first_trigger_counts() {
        let mut label = IdleLabel::new(DEFAULT_DEBOUNCE, false);
        let t0 = Instant::now();
        label.on_value(Some(&key()), t0);
        assert!(label.is_active());
    }

    #[test]
    fn turns_off_after_quiet_period() {
        let mut label = IdleLabel::new(Duration::from_millis(2000), false);
        let t0 = Instant::now();
        label.on_value(Some(&key()), t0);

        assert!(label.poll(t0 + Duration::from_millis(1999)));
        assert!(!label.poll(t0 + Duration::from_millis(2000)));
    }

    #[test]
    fn new_trigger_restarts_window() {
        let mut label = IdleLabel::new(Duration::from_millis(2000), false);
        let t0 = Instant::now();
        label.on_value(Some(&key()), t0);
        label.on_value(Some(&key()), t0 + Duration::from_millis(1500));

        assert!(label.poll(t0 + Duration::from_millis(3000)));
        assert!(!label.poll(t0 + Duration::from_millis(3500)));
    }
}
