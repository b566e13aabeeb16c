//! Owned timer handles
//!
//! Hosts keep one handle per [`TimerKind`] in a [`TimerSlots`]. Arming a slot
//! cancels whatever it held before, and dropping the slots cancels
//! everything, so a timer can never outlive the overlay that scheduled it.

use std::time::Duration;

use crate::overlay::{TimerCommand, TimerKind, TimerToken};

/// A running one-shot timer that can be stopped before it fires.
pub trait TimerHandle {
    fn cancel(self);
}

pub struct TimerSlots<H: TimerHandle> {
    slots: [Option<(TimerToken, H)>; 3],
}

impl<H: TimerHandle> TimerSlots<H> {
    pub fn new() -> Self {
        Self {
            slots: Default::default(),
        }
    }

    /// Store `handle` for `token.kind`, cancelling the previous timer of that kind.
    pub fn arm(&mut self, token: TimerToken, handle: H) {
        if let Some((_, previous)) = self.slots[token.kind.index()].replace((token, handle)) {
            previous.cancel();
        }
    }

    /// Cancel the timer of this kind. Returns false if none was armed.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        match self.slots[kind.index()].take() {
            Some((_, handle)) => {
                handle.cancel();
                true
            }
            None => false,
        }
    }

    /// Forget the handle of a timer that has just fired.
    ///
    /// Returns false when the slot holds a different (newer) timer, which is
    /// left untouched.
    pub fn release(&mut self, token: TimerToken) -> bool {
        let slot = &mut self.slots[token.kind.index()];
        if slot.as_ref().is_some_and(|(armed, _)| *armed == token) {
            *slot = None;
            true
        } else {
            false
        }
    }

    pub fn cancel_all(&mut self) {
        for kind in TimerKind::ALL {
            self.cancel(kind);
        }
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    pub fn armed_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Enact a batch of machine commands, starting new timers through `spawn`.
    pub fn apply<F>(&mut self, commands: impl IntoIterator<Item = TimerCommand>, mut spawn: F)
    where
        F: FnMut(TimerToken, Duration) -> H,
    {
        for command in commands {
            match command {
                TimerCommand::Schedule { token, after } => {
                    let handle = spawn(token, after);
                    self.arm(token, handle);
                }
                TimerCommand::Cancel { kind } => {
                    self.cancel(kind);
                }
            }
        }
    }
}

impl<H: TimerHandle> Default for TimerSlots<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: TimerHandle> Drop for TimerSlots<H> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::overlay::{OverlayMachine, OverlayOptions};

    /// Records cancelled timer ids into a shared log
    struct Recorder {
        id: usize,
        log: Rc<RefCell<Vec<usize>>>,
    }

    impl TimerHandle for Recorder {
        fn cancel(self) {
            self.log.borrow_mut().push(self.id);
        }
    }

    fn spawner(log: &Rc<RefCell<Vec<usize>>>) -> impl FnMut(TimerToken, Duration) -> Recorder + '_ {
        let mut next = 0;
        move |_, _| {
            next += 1;
            Recorder {
                id: next,
                log: Rc::clone(log),
            }
        }
    }

    #[test]
    fn apply_arms_scheduled_timers() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine = OverlayMachine::new(OverlayOptions::from_millis(1000));
        let mut slots = TimerSlots::new();

        slots.apply(machine.mount(true), spawner(&log));

        assert!(slots.is_armed(TimerKind::Entrance));
        assert!(slots.is_armed(TimerKind::Duration));
        assert!(!slots.is_armed(TimerKind::Grace));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn early_deactivation_cancels_pending_timers() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine = OverlayMachine::new(OverlayOptions::from_millis(1000));
        let mut slots = TimerSlots::new();
        let mut spawn = spawner(&log);

        slots.apply(machine.mount(true), &mut spawn);
        slots.apply(machine.set_activation(false), &mut spawn);

        // Entrance (1) and duration (2) cancelled, grace (3) armed
        assert_eq!(*log.borrow(), vec![1, 2]);
        assert_eq!(slots.armed_count(), 1);
        assert!(slots.is_armed(TimerKind::Grace));
    }

    #[test]
    fn release_ignores_superseded_token() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine = OverlayMachine::new(OverlayOptions::from_millis(1000));
        let mut slots = TimerSlots::new();
        let mut spawn = spawner(&log);

        let first = machine.mount(true);
        let TimerCommand::Schedule { token: old, .. } = first[1] else {
            panic!("expected duration schedule");
        };
        slots.apply(first, &mut spawn);
        slots.apply(machine.set_duration(Duration::from_millis(50)), &mut spawn);

        assert!(!slots.release(old));
        assert!(slots.is_armed(TimerKind::Duration));
    }

    #[test]
    fn drop_cancels_everything() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine = OverlayMachine::default();
        {
            let mut slots = TimerSlots::new();
            slots.apply(machine.mount(true), spawner(&log));
        }
        let mut cancelled = log.borrow().clone();
        cancelled.sort_unstable();
        assert_eq!(cancelled, vec![1, 2]);
    }
}
