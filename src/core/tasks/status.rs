use std::sync::{
    atomic::{
        AtomicUsize,
        Ordering,
    },
    mpsc,
    Arc,
};

use super::SessionEvent;
use crate::core::SessionStatus;

/// Shared busy counter. The session is `Analyzing` while any guard is alive.
#[derive(Debug, Clone, Default)]
pub struct StatusFlag {
    active: Arc<AtomicUsize>,
}

impl StatusFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> SessionStatus {
        if self.active.load(Ordering::Acquire) > 0 {
            SessionStatus::Analyzing
        } else {
            SessionStatus::Idle
        }
    }

    pub fn enter(&self, events: mpsc::Sender<SessionEvent>) -> BusyGuard {
        if self.active.fetch_add(1, Ordering::AcqRel) == 0 {
            let _ = events.send(SessionEvent::StatusChanged(SessionStatus::Analyzing));
        }
        BusyGuard { active: self.active.clone(), events }
    }
}

/// Releases the busy state on drop: normal return, `?` early exit, panic, or a
/// dropped future.
#[must_use = "the session is idle again as soon as the guard is dropped"]
pub struct BusyGuard {
    active: Arc<AtomicUsize>,
    events: mpsc::Sender<SessionEvent>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        if self.active.fetch_sub(1, Ordering::AcqRel) == 1 {
            let _ = self.events.send(SessionEvent::StatusChanged(SessionStatus::Idle));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_toggles_status() {
        let (sender, receiver) = mpsc::channel();
        let flag = StatusFlag::new();
        assert_eq!(flag.get(), SessionStatus::Idle);

        {
            let _guard = flag.enter(sender.clone());
            assert_eq!(flag.get(), SessionStatus::Analyzing);
        }
        assert_eq!(flag.get(), SessionStatus::Idle);

        let events: Vec<_> = receiver.try_iter().collect();
        assert!(matches!(events.as_slice(), [
            SessionEvent::StatusChanged(SessionStatus::Analyzing),
            SessionEvent::StatusChanged(SessionStatus::Idle),
        ]));
    }

    #[test]
    fn test_nested_guards_stay_busy_until_last_drop() {
        let (sender, _receiver) = mpsc::channel();
        let flag = StatusFlag::new();

        let outer = flag.enter(sender.clone());
        let inner = flag.enter(sender);
        drop(outer);
        assert_eq!(flag.get(), SessionStatus::Analyzing);
        drop(inner);
        assert_eq!(flag.get(), SessionStatus::Idle);
    }

    #[test]
    fn test_guard_released_on_panic() {
        let (sender, _receiver) = mpsc::channel();
        let flag = StatusFlag::new();
        let cloned = flag.clone();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = cloned.enter(sender);
            panic!("pipeline failure");
        }));

        assert!(result.is_err());
        assert_eq!(flag.get(), SessionStatus::Idle);
    }
}
